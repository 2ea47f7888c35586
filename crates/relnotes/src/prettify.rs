//! Human-readable SIG names.
//!
//! Labels arrive in their raw `sig-foo` form with the prefix already
//! stripped (`cluster-lifecycle`, `vsphere-storage`). These helpers turn them
//! into the names printed in headings.

/// Tokens whose spelling can't be derived from a casing rule.
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("vsphere", "vSphere"),
    ("vmware", "VMWare"),
    ("openstack", "OpenStack"),
];

/// Tokens printed fully upper-cased.
const ACRONYMS: &[&str] = &["api", "aws", "cli", "gcp"];

/// Prettify a single SIG label.
///
/// ```
/// use relnotes::prettify::prettify;
///
/// assert_eq!(prettify("vsphere-storage"), "vSphere Storage");
/// assert_eq!(prettify("api-machinery"), "API Machinery");
/// ```
#[must_use]
pub fn prettify(label: &str) -> String {
    label
        .split('-')
        .map(prettify_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn prettify_token(token: &str) -> String {
    if let Some((_, pretty)) = SPECIAL_CASES.iter().find(|(raw, _)| *raw == token) {
        return (*pretty).to_string();
    }
    if ACRONYMS.contains(&token) {
        return token.to_uppercase();
    }
    title_case(token)
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Compose the heading shared by notes attributed to a set of SIGs.
///
/// Labels are sorted first, so the same set always yields the same header
/// regardless of the order the labels were attached in.
///
/// ```
/// use relnotes::prettify::sig_list_header;
///
/// let sigs = vec!["node".to_string(), "api-machinery".to_string()];
/// assert_eq!(sig_list_header(&sigs), "SIG API Machinery and SIG Node");
/// ```
#[must_use]
pub fn sig_list_header(sigs: &[String]) -> String {
    let mut sorted: Vec<&str> = sigs.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let names: Vec<String> = sorted
        .into_iter()
        .map(|sig| format!("SIG {}", prettify(sig)))
        .collect();

    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
