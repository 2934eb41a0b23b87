//! Workspace naming and addressing rules.
//!
//! No I/O, async, or external layer imports.
//! All functions take data in and return data out.

/// Prefix applied to every derived unit name.
pub const UNIT_NAME_PREFIX: &str = "ws-";

/// Platform limit on unit name length.
pub const UNIT_NAME_MAX_LEN: usize = 30;

/// Header that pins a request on the shared app domain to one unit.
///
/// Without it the edge load balancer may pick any sibling unit of the app.
pub const STICKY_ROUTING_HEADER: &str = "fly-force-instance-id";

/// Derive the unit name for a project.
///
/// The name is a pure function of `project_id`: lowercase ASCII
/// alphanumerics are kept, every other run of characters collapses to a
/// single `-`, and the result is prefixed with [`UNIT_NAME_PREFIX`] and cut
/// to [`UNIT_NAME_MAX_LEN`]. Repeated creates for one project therefore
/// target the same logical name.
#[must_use]
pub fn derive_unit_name(project_id: &str) -> String {
    let mut slug = String::with_capacity(project_id.len());
    for c in project_id.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let mut name = format!("{UNIT_NAME_PREFIX}{slug}");
    name.truncate(UNIT_NAME_MAX_LEN);
    while name.ends_with('-') && name.len() > UNIT_NAME_PREFIX.len() {
        name.pop();
    }
    if name.len() == UNIT_NAME_PREFIX.len() {
        name.push_str("unnamed");
    }
    name
}
