//! Widgets driven through the program simulator.
//!
//! Covers the event contracts owners rely on:
//! - Autosuggest input and selection events
//! - Dropdown activation and item clicks
//! - Modal dismissal and visibility sync

#![forbid(unsafe_code)]

use keel_core::simulator::ProgramSimulator;
use keel_core::{BlurMsg, FocusMsg, KeyMsg, KeyType, Message, Model};
use keel_widgets::autosuggest::{
    Autosuggest, AutosuggestBlurredMsg, AutosuggestFocusedMsg, FilteringType, InputChangedMsg,
    SuggestOption, SuggestionSelectedMsg,
};
use keel_widgets::button::ButtonClickedMsg;
use keel_widgets::dropdown::{ButtonDropdown, DropdownItem, DropdownItemClickedMsg};
use keel_widgets::modal::{Modal, ModalClosedMsg};

fn services() -> Vec<SuggestOption> {
    vec![
        SuggestOption::new("ds").label("AWS Directory Service"),
        SuggestOption::new("dc").label("AWS Direct Connect"),
        SuggestOption::new("pay").label("Amazon Pay"),
    ]
}

fn type_text<M: Model>(sim: &mut ProgramSimulator<M>, text: &str) {
    for c in text.chars() {
        sim.send(Message::new(KeyMsg::from_char(c)));
    }
}

// =============================================================================
// Autosuggest
// =============================================================================

mod autosuggest_tests {
    use super::*;

    #[test]
    fn test_manual_filtering_reports_every_change() {
        let input = Autosuggest::new(services()).filtering(FilteringType::Manual);
        let mut sim = ProgramSimulator::new(input);
        sim.send(Message::new(FocusMsg));
        type_text(&mut sim, "pay");
        sim.run_until_empty();

        assert_eq!(sim.events_of::<AutosuggestFocusedMsg>().len(), 1);
        let values: Vec<&str> = sim
            .events_of::<InputChangedMsg>()
            .iter()
            .map(|m| m.value.as_str())
            .collect();
        assert_eq!(values, vec!["p", "pa", "pay"]);
        assert_eq!(sim.model().visible_options().len(), 3, "owner filters manually");
    }

    #[test]
    fn test_auto_filtering_never_reports_changes() {
        let mut sim = ProgramSimulator::new(Autosuggest::new(services()));
        sim.send(Message::new(FocusMsg));
        type_text(&mut sim, "direct");
        sim.run_until_empty();

        assert!(sim.events_of::<InputChangedMsg>().is_empty());
        assert_eq!(sim.model().visible_options().len(), 2);
    }

    #[test]
    fn test_enter_selects_once() {
        let mut sim = ProgramSimulator::new(Autosuggest::new(services()));
        sim.send(Message::new(FocusMsg));
        type_text(&mut sim, "connect");
        sim.send(Message::new(KeyMsg::from_type(KeyType::Enter)));
        sim.send(Message::new(BlurMsg));
        sim.run_until_empty();

        let selected = sim.events_of::<SuggestionSelectedMsg>();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].option.value, "dc");
        assert_eq!(sim.model().selected().map(|o| o.value.as_str()), Some("dc"));
        assert!(!sim.model().is_open());
        assert_eq!(sim.events_of::<AutosuggestBlurredMsg>().len(), 1);
    }
}

// =============================================================================
// Dropdown
// =============================================================================

mod dropdown_tests {
    use super::*;

    fn menu() -> ButtonDropdown {
        ButtonDropdown::new(
            "Actions",
            vec![
                DropdownItem::new("Start"),
                DropdownItem::new("Stop").disabled(true),
                DropdownItem::heading("More", vec![DropdownItem::new("Reboot")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_keyboard_click_through_menu() {
        let dropdown = menu();
        let button_id = dropdown.button_id();
        let dropdown_id = dropdown.id();
        let mut sim = ProgramSimulator::new(dropdown);
        sim.send(Message::new(FocusMsg));
        sim.send(Message::new(KeyMsg::from_type(KeyType::Enter)));
        sim.run_until_empty();

        let clicks = sim.events_of::<ButtonClickedMsg>();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].id, button_id);
        assert!(sim.model().is_open());

        sim.send(Message::new(KeyMsg::from_type(KeyType::Down)));
        sim.send(Message::new(KeyMsg::from_type(KeyType::Enter)));
        sim.run_until_empty();

        let items = sim.events_of::<DropdownItemClickedMsg>();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].dropdown_id, dropdown_id);
        assert_eq!(items[0].path, vec![2, 0], "disabled item and heading are skipped");
        assert!(!sim.model().is_open());
    }

    #[test]
    fn test_unfocused_dropdown_ignores_keys() {
        let mut sim = ProgramSimulator::new(menu());
        sim.send(Message::new(KeyMsg::from_type(KeyType::Enter)));
        sim.run_until_empty();
        assert!(sim.events().is_empty());
        assert!(!sim.model().is_open());
    }
}

// =============================================================================
// Modal
// =============================================================================

mod modal_tests {
    use super::*;

    #[test]
    fn test_escape_dismisses_once() {
        let modal = Modal::new("Delete instance").body("This cannot be undone.").visible(true);
        let modal_id = modal.id();
        let mut sim = ProgramSimulator::new(modal);
        sim.send(Message::new(KeyMsg::from_type(KeyType::Esc)));
        sim.send(Message::new(KeyMsg::from_type(KeyType::Esc)));
        sim.run_until_empty();

        let closed = sim.events_of::<ModalClosedMsg>();
        assert_eq!(closed.len(), 1, "a hidden modal does not close again");
        assert_eq!(closed[0].modal_id, modal_id);
        assert_eq!(sim.last_view(), Some(""));
    }

    #[test]
    fn test_owner_flag_reopens_after_dismissal() {
        let mut modal = Modal::new("Confirm").visible(true);
        let _ = modal.close();
        modal.set_visible(true);
        assert!(!modal.is_visible(), "unchanged flag is not re-applied");
        modal.set_visible(false);
        modal.set_visible(true);
        assert!(modal.is_visible());
    }
}
