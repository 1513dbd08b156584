pub mod api_email;
pub mod contact;
pub mod email_row;
pub mod payload;
