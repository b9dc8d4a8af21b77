//! Panel tab state: exactly one tab is active at a time.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Info,
    Legend,
    About,
}

impl PanelTab {
    pub const ALL: [PanelTab; 3] = [PanelTab::Info, PanelTab::Legend, PanelTab::About];

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Info => "Info",
            PanelTab::Legend => "Legend",
            PanelTab::About => "About",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_is_the_default_tab() {
        assert_eq!(PanelTab::default(), PanelTab::Info);
    }

    #[test]
    fn labels_are_distinct() {
        let labels: Vec<&str> = PanelTab::ALL.iter().map(|t| t.label()).collect();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn all_lists_every_tab_once() {
        assert_eq!(PanelTab::ALL.len(), 3);
        for (i, a) in PanelTab::ALL.iter().enumerate() {
            for b in &PanelTab::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
