pub static PROP_PLACEHOLDER: &'static str = "placeholder";
pub static PROP_TITLE: &'static str = "title";
pub static PROP_NAME: &'static str = "name";
pub static PROP_TYPE: &'static str = "type";
pub static PROP_VALUE: &'static str = "value";
pub static PROP_DISABLED: &'static str = "disabled";
pub static PROP_AUTOCOMPLETE: &'static str = "autocomplete";

pub static TAG_DIV: &'static str = "div";
pub static TAG_SPAN: &'static str = "span";
pub static TAG_INPUT: &'static str = "input";
pub static TAG_BUTTON: &'static str = "button";

pub static KEY_ENTER: &'static str = "Enter";

pub const NOTICE_TIMEOUT_MS: u32 = 4000;
