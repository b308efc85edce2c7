pub mod date_input;
pub mod form;
pub mod member_picker;
pub mod popup;
pub mod select;
pub mod table;
