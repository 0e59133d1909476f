//! Demo page laid out in terminal rows, and the viewport over it

use parallax_core::{BoundingBox, ViewportProvider};

/// Pixel distances in the engine config are scaled by this per terminal row
pub const PX_PER_ROW: f64 = 20.0;

/// One content section of the page
#[derive(Debug, Clone)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub body: Vec<&'static str>,
    /// Blank rows around the content
    pub padding: u16,
}

impl Section {
    pub fn new(id: &'static str, title: &'static str, body: Vec<&'static str>) -> Self {
        Self {
            id,
            title,
            body,
            padding: 4,
        }
    }

    /// Title row, a gap, the body and padding on both sides
    pub fn height(&self) -> u16 {
        self.padding * 2 + 2 + self.body.len() as u16
    }
}

/// A section with its resolved document position
#[derive(Debug, Clone)]
pub struct PlacedSection {
    pub section: Section,
    pub top: u16,
}

impl PlacedSection {
    pub fn bottom(&self) -> u16 {
        self.top + self.section.height()
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.top as f64, self.bottom() as f64)
    }
}

/// Sections stacked top to bottom
#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<PlacedSection>,
    height: u16,
}

impl Page {
    pub fn new(sections: Vec<Section>) -> Self {
        let mut top = 0u16;
        let sections = sections
            .into_iter()
            .map(|section| {
                let placed = PlacedSection { section, top };
                top = placed.bottom();
                placed
            })
            .collect();
        Self { sections, height: top }
    }

    /// The case-study page
    pub fn case_study() -> Self {
        Self::new(vec![
            Section::new(
                "hero",
                "Securing Critical Infrastructure",
                vec![
                    "A security analyst's case study in threat detection,",
                    "incident response and compliance engineering.",
                    "",
                    "Scroll with j/k, half pages with d/u, jump with g/G.",
                ],
            ),
            Section::new(
                "about",
                "The Problem",
                vec![
                    "Fragmented monitoring left gaps between network,",
                    "endpoint and identity telemetry.",
                    "",
                    "The Solution",
                    "One correlated pipeline with shared detection rules.",
                ],
            ),
            Section::new(
                "experience",
                "Security Dashboard",
                vec![
                    "Threat level      ████████░░  elevated",
                    "Open incidents    ███░░░░░░░  3",
                    "Patch coverage    █████████░  94%",
                    "MFA adoption      ██████████  100%",
                ],
            ),
            Section::new(
                "animated-typography",
                "Security Principles",
                vec![
                    "Defense in depth",
                    "Least privilege",
                    "Zero trust",
                    "Continuous monitoring",
                ],
            ),
            Section::new(
                "projects",
                "Research",
                vec![
                    "Anomaly detection over authentication logs.",
                    "Lateral-movement heuristics for flat networks.",
                ],
            ),
            Section::new(
                "fingerprint-auth",
                "Biometric Verification",
                vec![
                    "A scripted demo of a fingerprint scan.",
                    "Press s to scan, r to reset.",
                ],
            ),
            Section::new(
                "certifications",
                "Compliance",
                vec![
                    "ISO 27001      ██████████  100%",
                    "SOC 2          █████████░  92%",
                    "NIST CSF       ████████░░  85%",
                ],
            ),
            Section::new(
                "contact",
                "Get In Touch",
                vec!["Open to security engineering roles and consulting."],
            ),
        ])
    }

    pub fn sections(&self) -> &[PlacedSection] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&PlacedSection> {
        self.sections.iter().find(|s| s.section.id == id)
    }

    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.section.id.to_string()).collect()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Largest scroll row that keeps the viewport filled
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height.saturating_sub(viewport_height)
    }

    /// Section covering a document row
    pub fn section_at(&self, row: u16) -> Option<&PlacedSection> {
        self.sections.iter().find(|s| row >= s.top && row < s.bottom())
    }
}

/// Viewport provider over a `Page`, in rows
#[derive(Debug, Clone)]
pub struct PageViewport {
    page: Page,
    scroll_y: u16,
    viewport_height: u16,
    /// Sections not yet mounted report no geometry
    mounted: bool,
}

impl PageViewport {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            scroll_y: 0,
            viewport_height: 0,
            mounted: false,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn scroll_row(&self) -> u16 {
        self.scroll_y
    }

    pub fn height_rows(&self) -> u16 {
        self.viewport_height
    }

    pub fn set_scroll(&mut self, scroll_y: u16) {
        self.scroll_y = scroll_y;
    }

    pub fn resize(&mut self, viewport_height: u16) {
        self.viewport_height = viewport_height;
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn max_scroll(&self) -> u16 {
        self.page.max_scroll(self.viewport_height)
    }
}

impl ViewportProvider for PageViewport {
    fn current_scroll_y(&self) -> f64 {
        self.scroll_y as f64
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height as f64
    }

    fn document_height(&self) -> f64 {
        self.page.height() as f64
    }

    fn bounding_box_of(&self, element_id: &str) -> Option<BoundingBox> {
        if !self.mounted {
            return None;
        }
        self.page.section(element_id).map(PlacedSection::bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(vec![
            Section::new("a", "A", vec!["1", "2"]),
            Section::new("b", "B", vec!["1"]),
        ])
    }

    #[test]
    fn test_layout_stacks_sections() {
        let page = page();
        assert_eq!(page.sections()[0].top, 0);
        assert_eq!(page.sections()[0].bottom(), 12);
        assert_eq!(page.sections()[1].top, 12);
        assert_eq!(page.height(), 23);
        assert_eq!(page.section_at(12).map(|s| s.section.id), Some("b"));
        assert!(page.section_at(23).is_none());
    }

    #[test]
    fn test_max_scroll() {
        let page = page();
        assert_eq!(page.max_scroll(10), 13);
        assert_eq!(page.max_scroll(40), 0);
    }

    #[test]
    fn test_unmounted_viewport_hides_geometry() {
        let mut viewport = PageViewport::new(page());
        assert!(viewport.bounding_box_of("a").is_none());
        viewport.mount();
        assert_eq!(viewport.bounding_box_of("b"), Some(BoundingBox::new(12.0, 23.0)));
        assert!(viewport.bounding_box_of("zzz").is_none());
    }

    #[test]
    fn test_case_study_has_nav_sections() {
        let page = Page::case_study();
        for id in ["about", "experience", "projects", "certifications", "contact"] {
            assert!(page.section(id).is_some(), "missing {}", id);
        }
    }
}
