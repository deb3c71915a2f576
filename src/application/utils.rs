/// Derives a team identifier from a display name, transliterating to ASCII.
/// e.g. `"  My Crazy Team Name  "` -> `"my-crazy-team-name"`
/// e.g. `"Café Olé"` -> `"cafe-ole"`
pub fn slugify(name: &str) -> String {
    slug::slugify(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Crazy Team Name"), "my-crazy-team-name");
        assert_eq!(slugify("     My Crazy Team Name         "), "my-crazy-team-name");
        assert_eq!(slugify("Hack & Slash!"), "hack-slash");
        assert_eq!(slugify("ocean-mongrels"), "ocean-mongrels");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café Olé"), "cafe-ole");
        assert_eq!(slugify("Straße Crew"), "strasse-crew");
    }
}
