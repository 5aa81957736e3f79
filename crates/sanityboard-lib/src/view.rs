//! User-selected view parameters and their projection over the run list.
//!
//! `FilterState` is a plain value owned by whoever renders a view; there is
//! no process-wide singleton, so independent views and tests never share
//! state. All transitions are synchronous setters.

use crate::aggregate::parse_run_date;
use chrono::{DateTime, NaiveDate};
use sanityboard_types::{AgentType, ModelType, Run};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    All,
    #[default]
    VerifiedOnly,
    CommunityOnly,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(ViewMode::All),
            "verified" => Some(ViewMode::VerifiedOnly),
            "community" => Some(ViewMode::CommunityOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Score,
    PassRate,
    Date,
    Agent,
    Provider,
    Model,
}

impl SortField {
    /// Numeric and date columns read best highest/newest first; name
    /// columns read best alphabetically.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Score | SortField::PassRate | SortField::Date => SortDirection::Descending,
            SortField::Agent | SortField::Provider | SortField::Model => SortDirection::Ascending,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "score" => Some(SortField::Score),
            "pass_rate" => Some(SortField::PassRate),
            "date" => Some(SortField::Date),
            "agent" => Some(SortField::Agent),
            "provider" => Some(SortField::Provider),
            "model" => Some(SortField::Model),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Everything the user has selected about how to view the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub view: ViewMode,
    pub sort_by: SortField,
    pub direction: SortDirection,
    pub search: String,
    pub providers: BTreeSet<String>,
    pub models: BTreeSet<String>,
    pub agents: BTreeSet<String>,
    pub mcp_tools: Option<bool>,
    pub agent_type: Option<AgentType>,
    pub model_type: Option<ModelType>,
    /// Inclusive date range over the run date.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            view: ViewMode::default(),
            sort_by: SortField::default(),
            direction: SortField::default().default_direction(),
            search: String::new(),
            providers: BTreeSet::new(),
            models: BTreeSet::new(),
            agents: BTreeSet::new(),
            mcp_tools: None,
            agent_type: None,
            model_type: None,
            date_range: None,
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

impl FilterState {
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Multi-select facets toggle: present is removed, absent is added.
    pub fn toggle_provider(&mut self, provider: &str) {
        toggle(&mut self.providers, provider);
    }

    pub fn toggle_model(&mut self, model: &str) {
        toggle(&mut self.models, model);
    }

    pub fn toggle_agent(&mut self, agent: &str) {
        toggle(&mut self.agents, agent);
    }

    pub fn set_mcp_tools(&mut self, value: Option<bool>) {
        self.mcp_tools = value;
    }

    pub fn set_agent_type(&mut self, value: Option<AgentType>) {
        self.agent_type = value;
    }

    pub fn set_model_type(&mut self, value: Option<ModelType>) {
        self.model_type = value;
    }

    pub fn set_date_range(&mut self, range: Option<(NaiveDate, NaiveDate)>) {
        self.date_range = range;
    }

    /// Reselecting the active field flips direction; a new field resets
    /// direction to that field's default.
    pub fn set_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.direction = self.direction.flipped();
        } else {
            self.sort_by = field;
            self.direction = field.default_direction();
        }
    }

    /// Back to every default at once.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    pub fn matches(&self, run: &Run) -> bool {
        let metadata = &run.metadata;

        match self.view {
            ViewMode::All => {}
            ViewMode::VerifiedOnly if !metadata.is_verified() => return false,
            ViewMode::CommunityOnly if metadata.is_verified() => return false,
            _ => {}
        }

        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let haystacks = [
                &metadata.agent_name,
                &metadata.model_name,
                &metadata.model_provider,
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&query)) {
                return false;
            }
        }

        if !self.providers.is_empty() && !self.providers.contains(&metadata.model_provider) {
            return false;
        }
        if !self.models.is_empty() && !self.models.contains(&metadata.model_name) {
            return false;
        }
        if !self.agents.is_empty() && !self.agents.contains(&metadata.agent_name) {
            return false;
        }

        if let Some(wanted) = self.mcp_tools {
            if metadata.has_mcp_tools() != wanted {
                return false;
            }
        }
        if let Some(wanted) = self.agent_type {
            if metadata.agent_type != Some(wanted) {
                return false;
            }
        }
        if let Some(wanted) = self.model_type {
            if metadata.model_type != Some(wanted) {
                return false;
            }
        }

        if let Some((start, end)) = self.date_range {
            match run_naive_date(run) {
                Some(date) => {
                    if date < start || date > end {
                        return false;
                    }
                }
                // An unparseable date cannot satisfy a range filter.
                None => return false,
            }
        }

        true
    }

    /// Project the loaded collection into what this state asks to display.
    /// The sort is stable, so equal keys keep the caller's order.
    pub fn apply(&self, runs: &[Run]) -> Vec<Run> {
        let mut selected: Vec<Run> = runs.iter().filter(|r| self.matches(r)).cloned().collect();

        selected.sort_by(|a, b| {
            let ordering = match self.sort_by {
                SortField::Score => a.weighted_score().total_cmp(&b.weighted_score()),
                SortField::PassRate => a.pass_rate().total_cmp(&b.pass_rate()),
                SortField::Date => {
                    crate::aggregate::run_timestamp(a).cmp(&crate::aggregate::run_timestamp(b))
                }
                SortField::Agent => cmp_ci(&a.metadata.agent_name, &b.metadata.agent_name),
                SortField::Provider => {
                    cmp_ci(&a.metadata.model_provider, &b.metadata.model_provider)
                }
                SortField::Model => cmp_ci(&a.metadata.model_name, &b.metadata.model_name),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        selected
    }
}

fn cmp_ci(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn run_naive_date(run: &Run) -> Option<NaiveDate> {
    let date = &run.metadata.run_date;
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    parse_run_date(date).and_then(|ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanityboard_types::{RunMetadata, RunStats};

    fn run(id: &str, agent: &str, verified: bool, score: f64, date: &str) -> Run {
        Run {
            id: id.to_string(),
            metadata: RunMetadata {
                agent_name: agent.to_string(),
                agent_version: "1.0".to_string(),
                agent_type: None,
                agent_url: None,
                model_name: format!("{agent}-model"),
                variant: None,
                model_type: None,
                model_provider: "TestCo".to_string(),
                access_provider: None,
                run_date: date.to_string(),
                mcp_tools_available: None,
                verified: verified.then_some(true),
            },
            stats: Some(RunStats {
                weighted_score: Some(score),
                ..RunStats::default()
            }),
            results: None,
        }
    }

    fn ids(runs: &[Run]) -> Vec<&str> {
        runs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn facet_toggle_twice_is_a_round_trip() {
        let mut state = FilterState::default();
        let before = state.providers.clone();
        state.toggle_provider("OpenAI");
        assert!(state.providers.contains("OpenAI"));
        state.toggle_provider("OpenAI");
        assert_eq!(state.providers, before);
    }

    #[test]
    fn default_view_hides_community_runs() {
        let runs = vec![
            run("v", "Amp Code CLI", true, 10.0, "2026-01-13"),
            run("c", "Kimi CLI", false, 12.0, "2026-01-09"),
        ];
        let state = FilterState::default();
        assert_eq!(ids(&state.apply(&runs)), vec!["v"]);

        let mut community = FilterState::default();
        community.set_view(ViewMode::CommunityOnly);
        assert_eq!(ids(&community.apply(&runs)), vec!["c"]);
    }

    #[test]
    fn search_is_case_insensitive_over_agent_model_provider() {
        let runs = vec![
            run("a", "Amp Code CLI", true, 10.0, "2026-01-13"),
            run("b", "Gemini CLI", true, 9.0, "2026-01-14"),
        ];
        let mut state = FilterState::default();
        state.set_search("gemini");
        assert_eq!(ids(&state.apply(&runs)), vec!["b"]);
        state.set_search("testco");
        assert_eq!(state.apply(&runs).len(), 2);
    }

    #[test]
    fn new_sort_field_gets_its_default_direction() {
        let mut state = FilterState::default();
        assert_eq!(state.direction, SortDirection::Descending);

        state.set_sort(SortField::Agent);
        assert_eq!(state.sort_by, SortField::Agent);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.set_sort(SortField::Date);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn reselecting_the_sort_field_flips_direction() {
        let mut state = FilterState::default();
        state.set_sort(SortField::Score);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.set_sort(SortField::Score);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn sorting_by_agent_is_alphabetic_and_case_insensitive() {
        let runs = vec![
            run("b", "amp", true, 1.0, "2026-01-01"),
            run("a", "Aider", true, 2.0, "2026-01-01"),
            run("g", "Gemini", true, 3.0, "2026-01-01"),
        ];
        let mut state = FilterState::default();
        state.set_view(ViewMode::All);
        state.set_sort(SortField::Agent);
        assert_eq!(ids(&state.apply(&runs)), vec!["a", "b", "g"]);
    }

    #[test]
    fn date_range_excludes_out_of_range_and_unparseable_dates() {
        let runs = vec![
            run("in", "a", true, 1.0, "2026-01-10"),
            run("out", "b", true, 1.0, "2026-02-01"),
            run("bad", "c", true, 1.0, "someday"),
        ];
        let mut state = FilterState::default();
        state.set_date_range(Some((
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        )));
        assert_eq!(ids(&state.apply(&runs)), vec!["in"]);
    }

    #[test]
    fn reset_restores_every_default_at_once() {
        let mut state = FilterState::default();
        state.set_view(ViewMode::All);
        state.set_search("kimi");
        state.toggle_provider("OpenAI");
        state.toggle_agent("Amp");
        state.set_mcp_tools(Some(true));
        state.set_sort(SortField::Model);

        state.reset();
        assert_eq!(state, FilterState::default());
    }
}
