//! Scripted runs.
//!
//! A run focuses the chosen widget, delivers each configured key as a
//! [`KeyMsg`], and records the frame after every key together with a line
//! per emitted event. Remote tables are answered by the
//! [`InventoryServer`] as soon as they ask, passing the request token back.

use std::collections::VecDeque;
use std::fmt;

use keel_core::simulator::ProgramSimulator;
use keel_core::{FocusMsg, KeyMsg, Message, Model, drain};
use keel_widgets::autosuggest::{
    self, Autosuggest, AutosuggestBlurredMsg, AutosuggestFocusedMsg, InputChangedMsg,
    OptionGroup, RecoveryClickedMsg, SuggestOption, SuggestionSelectedMsg,
};
use keel_widgets::button::ButtonClickedMsg;
use keel_widgets::dropdown::{self, ButtonDropdown, DropdownItem, DropdownItemClickedMsg};
use keel_widgets::modal::{Modal, ModalClosedMsg};
use keel_widgets::table::{
    self, FetchDataMsg, FilterDebounceMsg, RetryRequestedMsg, SelectionChangedMsg, Table,
};

use crate::cli::WidgetKind;
use crate::config::DemoConfig;
use crate::data::{Instance, InventoryServer, columns, instances};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// View after focusing, then after each key, then once more if timers
    /// were still pending.
    pub frames: Vec<String>,
    /// One line per emitted event, in order.
    pub events: Vec<String>,
    /// Print every frame instead of the last.
    pub all_frames: bool,
}

impl Transcript {
    /// The final frame.
    pub fn last_frame(&self) -> &str {
        self.frames.last().map_or("", String::as_str)
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_frames {
            for (i, frame) in self.frames.iter().enumerate() {
                writeln!(f, "--- frame {i} ---")?;
                writeln!(f, "{frame}")?;
            }
        } else {
            writeln!(f, "{}", self.last_frame())?;
        }
        if self.events.is_empty() {
            return writeln!(f, "events: none");
        }
        writeln!(f, "events:")?;
        for event in &self.events {
            writeln!(f, "  {event}")?;
        }
        Ok(())
    }
}

/// Run the configured keys against `widget`.
///
/// # Errors
///
/// Returns an error if the widget rejects its configuration or an event
/// cannot be encoded.
pub fn run(widget: WidgetKind, config: &DemoConfig) -> anyhow::Result<Transcript> {
    tracing::info!(?widget, keys = config.keys.len(), "starting run");
    let mut transcript = match widget {
        WidgetKind::Table => run_table(config)?,
        WidgetKind::Autosuggest => run_autosuggest(config)?,
        WidgetKind::Dropdown => run_dropdown(config)?,
        WidgetKind::Modal => run_modal(config)?,
    };
    transcript.all_frames = config.frames;
    Ok(transcript)
}

/// Feed keys through a simulator, handing each batch of events to
/// `on_events` along with the model so owners can answer. Keys arrive
/// back to back; timers still pending after the last key are waited for and
/// their outcome is the final frame.
fn drive<M, F>(
    model: M,
    keys: &[String],
    route: impl Fn(&Message) -> bool + 'static,
    mut on_events: F,
) -> anyhow::Result<Transcript>
where
    M: Model,
    F: FnMut(&mut M, Vec<Message>, &mut Vec<String>) -> anyhow::Result<()>,
{
    let mut sim = ProgramSimulator::new(model).with_route(route);
    let mut transcript = Transcript::default();

    sim.init();
    sim.send(Message::new(FocusMsg));
    sim.run_until_empty();
    let batch = sim.take_events();
    on_events(sim.model_mut(), batch, &mut transcript.events)?;
    transcript.frames.push(sim.model().view());

    for key in keys {
        tracing::debug!(key = key.as_str(), "sending key");
        sim.send(Message::new(KeyMsg::parse(key)));
        sim.run_until_empty();
        let batch = sim.take_events();
        on_events(sim.model_mut(), batch, &mut transcript.events)?;
        transcript.frames.push(sim.model().view());
    }

    if sim.pending_timers() > 0 {
        tracing::debug!(pending = sim.pending_timers(), "waiting for timers");
        sim.settle();
        let batch = sim.take_events();
        on_events(sim.model_mut(), batch, &mut transcript.events)?;
        transcript.frames.push(sim.model().view());
    }
    Ok(transcript)
}

fn run_table(config: &DemoConfig) -> anyhow::Result<Transcript> {
    let rows = instances(config.rows);
    let remote = config.table.remote;
    let server = InventoryServer::new(rows.clone());
    let mut table = Table::new(columns(), config.table.clone())?
        .with_styles(table::Styles::from_theme(&config.theme))
        .with_action_group("[ Launch ]");
    if !remote {
        table = table.with_items(rows);
    }
    tracing::debug!(remote, rows = server.len(), "table ready");

    drive(
        table,
        &config.keys,
        |m| m.is::<FilterDebounceMsg>(),
        |table: &mut Table<Instance>, batch, events| {
            let mut queue: VecDeque<Message> = batch.into();
            while let Some(msg) = queue.pop_front() {
                if let Some(fetch) = msg.downcast_ref::<FetchDataMsg>() {
                    events.push(format!(
                        "fetch {} {}",
                        fetch.token,
                        serde_json::to_string(&fetch.request)?
                    ));
                    let page = server.answer(&fetch.request);
                    let received = table.receive_page(fetch.token, page.items, page.row_count);
                    if !received.is_accepted() {
                        events.push(format!("dropped answer to {}", fetch.token));
                    }
                    queue.extend(drain(received.into_cmd()));
                } else if let Some(changed) = msg.downcast_ref::<SelectionChangedMsg<Instance>>() {
                    events.push(format!("selection [{}]", changed.ids.join(", ")));
                } else if msg.is::<RetryRequestedMsg>() {
                    events.push("retry".to_string());
                } else {
                    events.push("unknown event".to_string());
                }
            }
            Ok(())
        },
    )
}

fn catalogue() -> Vec<OptionGroup> {
    vec![
        OptionGroup::new(
            "Compute",
            vec![
                SuggestOption::new("ec2").label("EC2").description("Virtual servers"),
                SuggestOption::new("lambda").label("Lambda").description("Run code without servers"),
                SuggestOption::new("batch").label("Batch").disabled(true),
            ],
        ),
        OptionGroup::new(
            "Storage",
            vec![
                SuggestOption::new("s3").label("S3").description("Object storage"),
                SuggestOption::new("efs").label("EFS").description("Elastic file system"),
            ],
        ),
        OptionGroup::new(
            "Networking",
            vec![
                SuggestOption::new("ds").label("AWS Directory Service"),
                SuggestOption::new("dc").label("AWS Direct Connect"),
            ],
        ),
    ]
}

fn run_autosuggest(config: &DemoConfig) -> anyhow::Result<Transcript> {
    let mut input = Autosuggest::new(catalogue())
        .placeholder("Find a service")
        .empty_text("No matching services");
    input.styles = autosuggest::Styles::from_theme(&config.theme);

    drive(input, &config.keys, |_| false, |_: &mut Autosuggest, batch, events| {
        for msg in batch {
            let line = if let Some(m) = msg.downcast_ref::<InputChangedMsg>() {
                format!("input {:?}", m.value)
            } else if let Some(m) = msg.downcast_ref::<SuggestionSelectedMsg>() {
                format!("selected {}", m.option.value)
            } else if msg.is::<AutosuggestFocusedMsg>() {
                "focus".to_string()
            } else if msg.is::<AutosuggestBlurredMsg>() {
                "blur".to_string()
            } else if msg.is::<RecoveryClickedMsg>() {
                "recover".to_string()
            } else {
                "unknown event".to_string()
            };
            events.push(line);
        }
        Ok(())
    })
}

fn run_dropdown(config: &DemoConfig) -> anyhow::Result<Transcript> {
    let mut menu = ButtonDropdown::new(
        "Instance actions",
        vec![
            DropdownItem::new("Start"),
            DropdownItem::new("Stop"),
            DropdownItem::new("Hibernate").disabled(true),
            DropdownItem::heading(
                "Networking",
                vec![DropdownItem::new("Attach address"), DropdownItem::new("Detach address")],
            ),
        ],
    )?;
    menu.styles = dropdown::Styles::from_theme(&config.theme);

    drive(menu, &config.keys, |_| false, |menu: &mut ButtonDropdown, batch, events| {
        for msg in batch {
            let line = if msg.is::<ButtonClickedMsg>() {
                "click".to_string()
            } else if let Some(m) = msg.downcast_ref::<DropdownItemClickedMsg>() {
                format!("item {:?} {}", m.path, item_text(menu.items(), &m.path))
            } else {
                "unknown event".to_string()
            };
            events.push(line);
        }
        Ok(())
    })
}

fn item_text<'a>(items: &'a [DropdownItem], path: &[usize]) -> &'a str {
    match path {
        [i] => items.get(*i).map_or("", |it| it.text.as_str()),
        [i, rest @ ..] => items.get(*i).map_or("", |it| item_text(&it.items, rest)),
        [] => "",
    }
}

fn run_modal(config: &DemoConfig) -> anyhow::Result<Transcript> {
    let mut modal = Modal::new("Terminate instance")
        .subtitle("web-003")
        .body("The instance and its volumes are deleted.")
        .footer("[ Cancel ]  [ Terminate ]")
        .visible(true);
    modal.theme = config.theme;

    drive(modal, &config.keys, |_| false, |_: &mut Modal, batch, events| {
        for msg in batch {
            let line = if msg.is::<ModalClosedMsg>() {
                "closed".to_string()
            } else {
                "unknown event".to_string()
            };
            events.push(line);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_style::strip_ansi;

    fn config(keys: &[&str]) -> DemoConfig {
        DemoConfig {
            keys: keys.iter().map(ToString::to_string).collect(),
            ..DemoConfig::default()
        }
    }

    #[test]
    fn test_local_table_pages() {
        let t = run(WidgetKind::Table, &config(&["n", "n"])).unwrap();
        assert_eq!(t.frames.len(), 3);
        assert!(strip_ansi(t.last_frame()).contains("21-25 of 25"));
        assert!(t.events.is_empty());
    }

    #[test]
    fn test_remote_table_is_served() {
        let mut c = config(&["n"]);
        c.rows = 56;
        c.table.remote = true;
        let t = run(WidgetKind::Table, &c).unwrap();

        assert_eq!(t.events.len(), 2);
        assert!(t.events[0].starts_with("fetch #1 {\"pageIndex\":0"));
        assert!(t.events[1].starts_with("fetch #2 {\"pageIndex\":1"));
        let view = strip_ansi(t.last_frame());
        assert!(view.contains("11-20 of 56"), "{view}");
        assert!(view.contains("web-010"));
    }

    #[test]
    fn test_remote_filter_typed_key_by_key_fetches_once() {
        let mut c = config(&["/", "w", "e", "b"]);
        c.rows = 56;
        c.table.remote = true;
        let t = run(WidgetKind::Table, &c).unwrap();

        let fetches: Vec<&String> = t.events.iter().filter(|e| e.starts_with("fetch")).collect();
        assert_eq!(fetches.len(), 2, "{fetches:?}");
        assert!(fetches[1].starts_with("fetch #2 "));
        assert!(fetches[1].contains(r#""filterText":"web""#));
        assert_eq!(t.frames.len(), 6, "focus, four keys, settled");
    }

    #[test]
    fn test_table_selection_events() {
        let t = run(WidgetKind::Table, &config(&["down", " ", "a"])).unwrap();
        assert_eq!(t.events[0], "selection [1]");
        assert!(t.events[1].starts_with("selection [0, 1, 10"));
    }

    #[test]
    fn test_autosuggest_selects() {
        let t = run(WidgetKind::Autosuggest, &config(&["s", "3", "enter"])).unwrap();
        assert_eq!(t.events, vec!["focus", "selected s3"]);
    }

    #[test]
    fn test_dropdown_item_text() {
        let t = run(WidgetKind::Dropdown, &config(&["enter", "down", "down", "enter"])).unwrap();
        assert_eq!(t.events, vec!["click", "item [3, 0] Attach address"]);
    }

    #[test]
    fn test_modal_closes() {
        let t = run(WidgetKind::Modal, &config(&["esc"])).unwrap();
        assert_eq!(t.events, vec!["closed"]);
        assert!(strip_ansi(&t.frames[0]).contains("Terminate instance"));
        assert_eq!(t.last_frame(), "");
    }

    #[test]
    fn test_transcript_display() {
        let t = Transcript {
            frames: vec!["a".into(), "b".into()],
            events: Vec::new(),
            all_frames: false,
        };
        assert_eq!(t.to_string(), "b\nevents: none\n");
    }
}
