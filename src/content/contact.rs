//! Contact details shown in the public footer.

/// Site name used in the copyright notice.
pub const SITE_NAME: &str = "puritygwaro.dev";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactLink {
    pub label: &'static str,
    pub href: &'static str,
    /// Primary call to action, rendered filled.
    pub primary: bool,
}

impl ContactLink {
    /// Off-site links open in a new tab; `mailto:` does not.
    pub fn opens_new_tab(&self) -> bool {
        self.href.starts_with("http")
    }
}

pub const CONTACT_LINKS: [ContactLink; 3] = [
    ContactLink {
        label: "GitHub",
        href: "https://github.com/PurityGwaro",
        primary: false,
    },
    ContactLink {
        label: "LinkedIn",
        href: "https://linkedin.com/in/purity-gwaro",
        primary: false,
    },
    ContactLink {
        label: "Contact Me",
        href: "mailto:puritygwaro99@gmail.com",
        primary: true,
    },
];

pub fn copyright_notice(year: u32) -> String {
    format!("© {} {} • All rights reserved.", year, SITE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyright_notice_carries_year_and_site() {
        assert_eq!(
            copyright_notice(2026),
            "© 2026 puritygwaro.dev • All rights reserved."
        );
    }

    #[test]
    fn only_web_links_open_new_tabs() {
        let tabs: Vec<_> = CONTACT_LINKS
            .iter()
            .map(|l| (l.label, l.opens_new_tab()))
            .collect();
        assert_eq!(
            tabs,
            vec![("GitHub", true), ("LinkedIn", true), ("Contact Me", false)]
        );
        assert_eq!(CONTACT_LINKS.iter().filter(|l| l.primary).count(), 1);
    }
}
