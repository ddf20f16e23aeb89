//! Form field names, mode values and label keys shared with the hosting page

// Names of the hidden multi-select inputs submitted with the page form
pub const VIEW_FIELD: &str = "view_groups[]";
pub const EDIT_FIELD: &str = "edit_groups[]";

// Name and values of the manage-access radio group
pub const MODE_FIELD: &str = "manage_access";
pub const MODE_MANAGED_HERE: &str = "1";
pub const MODE_INHERITED: &str = "0";

// Label keys looked up in the host-supplied i18n map
pub const LABEL_MANAGE_HERE: &str = "labelManageHere";
pub const LABEL_INHERIT_ACCESS: &str = "labelInheritAccess";
pub const LABEL_NO_INHERIT: &str = "labelNoInherit";
pub const LABEL_CHOOSE_GROUP: &str = "labelChooseGroup";
pub const HEADING_TABLE: &str = "headingTable";
pub const HEADING_USER_GROUP: &str = "headingUserGroup";
pub const HEADING_DESCRIPTION: &str = "headingDescription";
pub const HEADING_VIEW_PAGES: &str = "headingViewPages";
pub const HEADING_EDIT_PAGES: &str = "headingEditPages";

/// All label keys the widget markup reads, in render order
pub const LABEL_KEYS: &[&str] = &[
    LABEL_MANAGE_HERE,
    LABEL_INHERIT_ACCESS,
    LABEL_NO_INHERIT,
    HEADING_TABLE,
    HEADING_USER_GROUP,
    HEADING_DESCRIPTION,
    HEADING_VIEW_PAGES,
    HEADING_EDIT_PAGES,
    LABEL_CHOOSE_GROUP,
];
