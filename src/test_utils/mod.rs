#![allow(missing_docs)]

pub(crate) mod cookie;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use cookie::{response_cookies, session_cookie, test_key};
pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button, assert_form_submit_button_with_text, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, get_header};
