//! Short code generation and URL validation helpers
//!
//! These helpers are pure: they hold no state and never touch the repository.

use rand::{seq::IndexedRandom, Rng};
use url::Url;

/// Alphabet short codes are drawn from: `A-Z`, `a-z`, `0-9`
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in every generated short code
pub const SHORT_CODE_LENGTH: usize = 6;

/// Characters accepted in the host part of a URL
const HOST_SYMBOLS: &[char] = &['-', '.', '_', '~', '%'];

/// Generates a random 6-character alphanumeric short code
///
/// Every character is picked independently and uniformly from [`ALPHANUMERIC`]
/// using the thread-local generator from `rand`, which is a ChaCha-based CSPRNG
/// periodically reseeded from the operating system. Codes are therefore not
/// predictable from previously issued ones.
///
/// # Example
///
/// ```
/// # use url_shortener::utils::{generate_short_code, SHORT_CODE_LENGTH};
/// let code = generate_short_code();
/// assert_eq!(code.len(), SHORT_CODE_LENGTH);
/// ```
pub fn generate_short_code() -> String {
    short_code_from(&mut rand::rng())
}

fn short_code_from<R: Rng + ?Sized>(rng: &mut R) -> String {
    let alphabet = ALPHANUMERIC.as_bytes();
    (0..SHORT_CODE_LENGTH)
        .filter_map(|_| alphabet.choose(&mut *rng).copied())
        .map(char::from)
        .collect()
}

/// Returns `true` if `code` has the shape of a generated short code
pub fn is_short_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Checks that `url` is an absolute `http`/`https` URL with a host
///
/// Accepted shape: `scheme://[user[:pass]@]host[:port][/path][?query][#fragment]`
/// where the port, when written, has 2 to 5 digits. Whitespace and control
/// characters are rejected anywhere: the stored string is sent back verbatim
/// as a `Location` header.
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return false;
    }

    let authority = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host_port = match authority.rsplit_once('@') {
        Some((_, host_port)) => host_port,
        None => authority,
    };
    let (host, port) = match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    };

    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || HOST_SYMBOLS.contains(&c));
    let port_ok = port
        .is_none_or(|p| (2..=5).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit()));
    if !host_ok || !port_ok {
        return false;
    }

    // Final word goes to a real parser: it catches malformed escapes,
    // out-of-range ports and the like.
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
