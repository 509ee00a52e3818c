//! Route templates for span and metric labels.

use uuid::Uuid;

/// Collections addressed by name rather than id.
const NAMED_COLLECTIONS: [&str; 2] = ["organizations", "users"];

/// Replace id and name segments so metric labels stay bounded, e.g. `/offers/7` becomes
/// `/offers/{id}`.
pub(super) fn route_template(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut template = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            template.push('/');
        }

        if is_identifier(segment) {
            template.push_str("{id}");
        } else if index == 1 && NAMED_COLLECTIONS.contains(&previous) {
            template.push_str("{name}");
        } else {
            template.push_str(segment);
        }

        previous = segment;
    }

    template
}

fn is_identifier(segment: &str) -> bool {
    (!segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()))
        || Uuid::parse_str(segment).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_become_placeholders() {
        assert_eq!(route_template("/offers/7/availability"), "/offers/{id}/availability");
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/me/balance"), "/me/balance");
    }

    #[test]
    fn named_segments_become_placeholders() {
        assert_eq!(
            route_template("/organizations/Corner%20Bakery/offers"),
            "/organizations/{name}/offers"
        );
        assert_eq!(route_template("/users/alice/credits"), "/users/{name}/credits");
    }
}
