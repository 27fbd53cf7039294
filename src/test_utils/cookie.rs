use axum::{
    body::Body,
    http::{
        HeaderMap, HeaderValue, Response,
        header::{COOKIE, SET_COOKIE},
    },
    response::IntoResponse,
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key},
};
use sha2::{Digest, Sha512};

use crate::{auth::set_session_cookie, user::Username};

pub(crate) fn test_key() -> Key {
    Key::from(&Sha512::digest("foobar"))
}

/// An encrypted session cookie for `username`, as the browser would send it back.
pub(crate) fn session_cookie(key: &Key, username: &str) -> Cookie<'static> {
    let jar = set_session_cookie(PrivateCookieJar::new(key.clone()), &Username::new(username))
        .expect("could not set session cookie");
    let response = jar.into_response();
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("no set-cookie header")
        .to_str()
        .expect("set-cookie header is not a string")
        .to_owned();

    Cookie::parse(header).expect("could not parse set-cookie header")
}

/// Request headers holding the cookies the response asked the client to set.
pub(crate) fn response_cookies(response: &Response<Body>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for header in response.headers().get_all(SET_COOKIE) {
        let cookie = Cookie::parse(header.to_str().expect("set-cookie header is not a string"))
            .expect("could not parse set-cookie header");
        let value = HeaderValue::from_str(&format!("{}={}", cookie.name(), cookie.value()))
            .expect("cookie is not a valid header value");
        headers.append(COOKIE, value);
    }

    headers
}
