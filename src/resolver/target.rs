//! Target string parsing.
//!
//! A target is either a `unix:<path>` form naming a filesystem socket, or
//! a `host[:port]` form destined for the system resolver. Splitting is
//! deliberately schemeless, so the `url` crate does not apply here;
//! bracketed and bare IPv6 literals get the same treatment the original
//! C networking stacks give them.

/// Prefix marking a Unix-domain socket target.
pub const UNIX_SCHEME: &str = "unix:";

/// Extracts the filesystem path from a `unix:` target.
///
/// Returns `None` for non-unix targets and for `"unix:"` with an empty
/// remainder, which is treated as an ordinary (and doomed) host name.
pub fn unix_path_of(target: &str) -> Option<&str> {
    match target.strip_prefix(UNIX_SCHEME) {
        Some(path) if !path.is_empty() => Some(path),
        _ => None,
    }
}

/// Splits a target into its host and optional port/service components.
///
/// Handles three shapes:
/// - `[v6]` and `[v6]:port`: bracketed IPv6 literal; anything other
///   than nothing or `:port` after the closing bracket is malformed;
/// - `host:port`: exactly one colon splits the two;
/// - `a:b:c`: more than one colon without brackets is a bare IPv6
///   literal, taken wholesale as the host with no port.
///
/// Returns `None` when the host portion cannot be determined, including
/// the empty target and an empty host before a colon. An empty *port*
/// substring (`"host:"`) is preserved as `Some("")` and left for the
/// system resolver to reject.
pub fn split_host_port(name: &str) -> Option<(&str, Option<&str>)> {
    if let Some(rest) = name.strip_prefix('[') {
        let end = rest.find(']')?;
        let host = &rest[..end];
        if host.is_empty() {
            return None;
        }
        let after = &rest[end + 1..];
        if after.is_empty() {
            return Some((host, None));
        }
        return after.strip_prefix(':').map(|port| (host, Some(port)));
    }

    match name.rfind(':') {
        Some(idx) => {
            let (host, port) = (&name[..idx], &name[idx + 1..]);
            if host.contains(':') {
                // Bare IPv6 literal; the colons are part of the address.
                Some((name, None))
            } else if host.is_empty() {
                None
            } else {
                Some((host, Some(port)))
            }
        }
        None if name.is_empty() => None,
        None => Some((name, None)),
    }
}
