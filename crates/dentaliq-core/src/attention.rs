//! Attention filtering: which rows of an agent need follow-up, and how to
//! summarise them.
//!
//! A row needs attention when any of its values contains a term of the
//! shared indicator vocabulary, or when the rule of the agent's kind
//! matches. Rules are tagged variants of [`AttentionRule`], looked up by
//! [`AgentKind`] in an [`AttentionRegistry`].
//!
//! Field lookups are case-insensitive and accept an English alias for the
//! Czech column names the roster uses.

use std::collections::BTreeMap;

use dentaliq_types::{Agent, AgentKind, AttentionItem, Row};

/// Terms that flag a row regardless of agent kind (matched lowercase).
pub const INDICATORS: &[&str] = &[
    "⚠",
    "⏳",
    "📞",
    "chybí",
    "nalezeno",
    "problém",
    "neodpovězený",
    "přepojeno",
    "čeká",
    "vyžaduje",
    "nesoulad",
    "chybějící",
    "neúplná",
    "duplicitní",
];

/// Column holding an explicit problem description.
pub const PROBLEM_KEY: &str = "Popis problému";

/// Separator between the parts of an item's context line.
pub const CONTEXT_SEPARATOR: &str = " • ";

/// Keys considered a row's primary subject, in preference order.
const SUBJECT_KEYS: &[&str] = &["Pacient", "Odesílatel", "Soubor"];

/// Keys left out of the generic context line.
const GENERIC_CONTEXT_DENYLIST: &[&str] = &[
    "Link",
    "Čas",
    "Velikost",
    "Archiv",
    PROBLEM_KEY,
    "Pacient",
    "Odesílatel",
    "Soubor",
];

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// Value of the first of `keys` present in `row` (case-insensitive), or `""`.
fn field<'a>(row: &'a Row, keys: &[&str]) -> &'a str {
    keys.iter()
        .find_map(|key| {
            row.iter()
                .find(|(k, _)| k.to_lowercase() == key.to_lowercase())
                .map(|(_, v)| v.as_str())
        })
        .unwrap_or("")
}

fn result(row: &Row) -> &str {
    field(row, &["Výsledek", "Result"])
}

fn comment(row: &Row) -> &str {
    field(row, &["Komentář", "Comment"])
}

fn found(row: &Row) -> &str {
    field(row, &["Zjištěno", "Found"])
}

fn status(row: &Row) -> &str {
    field(row, &["Status"])
}

fn summary(row: &Row) -> &str {
    field(row, &["Shrnutí", "Summary"])
}

fn is_denied_context_key(key: &str) -> bool {
    let key = key.to_lowercase();
    GENERIC_CONTEXT_DENYLIST.iter().any(|d| d.to_lowercase() == key)
}

fn contains_any(value: &str, markers: &[&str]) -> bool {
    let lower = value.to_lowercase();
    markers.iter().any(|m| lower.contains(&m.to_lowercase()))
}

fn is_true_like(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "ano" | "yes" | "true" | "1"
    )
}

/// The first value in `row` containing an indicator term.
pub fn matched_indicator(row: &Row) -> Option<&str> {
    row.values()
        .map(String::as_str)
        .find(|v| contains_any(v, INDICATORS))
}

/// Join the non-empty parts with [`CONTEXT_SEPARATOR`].
fn join_context<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// `"<label>: <value>"`, or empty when the value is.
fn labelled(label: &str, value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        format!("{label}: {value}")
    }
}

/// `"<prefix>: <value>"`, or `None` when the value is empty.
fn quote(prefix: &str, value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| format!("{prefix}: {value}"))
}

/// Primary subject of a row without a dedicated subject column.
fn generic_subject(row: &Row, index: usize) -> String {
    SUBJECT_KEYS
        .iter()
        .map(|key| field(row, &[*key]))
        .chain(row.values().map(String::as_str))
        .find(|v| !v.trim().is_empty())
        .map_or_else(
            || format!("Záznam #{}", index.saturating_add(1)),
            str::to_owned,
        )
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Business rule deciding whether a row of one agent kind needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionRule {
    /// Phone calls: the result is waiting or was handed over to reception.
    CallResult,
    /// E-mails: the comment carries a warning or a finding was recorded.
    EmailTriage,
    /// Patient cards: the upload status is a warning, queued, or missing.
    CardStatus,
    /// Patient summaries: the summary reports minor issues or a required check.
    PatientSummary,
    /// Audits: every row is a finding.
    AuditAll,
    /// No dedicated rule; only the shared vocabulary applies.
    Vocabulary,
}

impl AttentionRule {
    /// The default rule for an agent kind.
    pub const fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Isabella => Self::CallResult,
            AgentKind::Gabriel => Self::EmailTriage,
            AgentKind::Leo => Self::CardStatus,
            AgentKind::Nora => Self::PatientSummary,
            AgentKind::Auditor => Self::AuditAll,
            AgentKind::Other => Self::Vocabulary,
        }
    }

    /// Whether the kind-specific part of the rule matches.
    fn type_marker(self, row: &Row) -> bool {
        match self {
            Self::CallResult => contains_any(result(row), &["⏳", "📞", "Čeká"]),
            Self::EmailTriage => contains_any(comment(row), &["⚠"]) || is_true_like(found(row)),
            Self::CardStatus => contains_any(status(row), &["⚠", "⏳", "Chybí"]),
            Self::PatientSummary => contains_any(summary(row), &["Drobné", "Nutná"]),
            Self::AuditAll => true,
            Self::Vocabulary => false,
        }
    }

    /// Whether `row` needs attention under this rule.
    pub fn matches(self, row: &Row) -> bool {
        self.type_marker(row) || matched_indicator(row).is_some()
    }

    /// Summarise `row` as the `index`-th attention item.
    pub fn describe(self, row: &Row, index: usize) -> AttentionItem {
        let (subject, context, fallback) = match self {
            Self::CallResult => {
                let outcome = result(row);
                (
                    field(row, &["Pacient", "Patient"]).to_owned(),
                    join_context([
                        field(row, &["Důvod hovoru"]),
                        field(row, &["Požadavek"]),
                        field(row, &["Čas"]),
                        outcome,
                    ]),
                    quote("Hovor vyžaduje další akci", outcome),
                )
            }
            Self::EmailTriage => {
                let topic = field(row, &["Téma", "Topic"]);
                let found_label = labelled("Zjištěno", found(row));
                (
                    field(row, &["Odesílatel", "Sender"]).to_owned(),
                    join_context([topic, found_label.as_str(), comment(row)]),
                    quote("E-mail vyžaduje okamžitou pozornost", topic),
                )
            }
            Self::CardStatus => {
                let card = status(row);
                (
                    field(row, &["Soubor", "File"]).to_owned(),
                    join_context([card, field(row, &["Velikost"]), field(row, &["Archiv"])]),
                    quote("Karta vyžaduje akci", card),
                )
            }
            Self::PatientSummary => {
                let text = summary(row);
                (
                    field(row, &["Pacient", "Patient"]).to_owned(),
                    join_context([field(row, &["Pojišťovna"]), text, field(row, &["Čas přípravy"])]),
                    quote("Shrnutí vyžaduje kontrolu", text),
                )
            }
            Self::AuditAll => {
                let problem = field(row, &["Problém", "Problem"]);
                let priority = labelled("Priorita", field(row, &["Priorita", "Priority"]));
                (
                    field(row, &["Pacient", "Patient"]).to_owned(),
                    join_context([problem, priority.as_str()]),
                    quote("Nalezen problém", problem),
                )
            }
            Self::Vocabulary => {
                let parts: Vec<String> = row
                    .iter()
                    .filter(|(k, _)| !is_denied_context_key(k))
                    .map(|(k, v)| labelled(k, v))
                    .collect();
                (
                    String::new(),
                    join_context(parts.iter().map(String::as_str)),
                    None,
                )
            }
        };

        let subject = if subject.trim().is_empty() {
            generic_subject(row, index)
        } else {
            subject
        };

        AttentionItem {
            patient_name: subject,
            context,
            problem_description: self.problem_description(row, fallback),
            source_row: row.clone(),
            index,
        }
    }

    /// The explicit problem text, else the kind fallback when the kind rule
    /// matched, else a quote of the matched indicator value.
    fn problem_description(self, row: &Row, fallback: Option<String>) -> String {
        let explicit = field(row, &[PROBLEM_KEY, "Problem description"]).trim();
        if !explicit.is_empty() {
            return explicit.to_owned();
        }
        if self.type_marker(row)
            && let Some(fallback) = fallback
        {
            return fallback;
        }
        matched_indicator(row)
            .map(|value| format!("Vyžaduje pozornost: {value}"))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Mapping from agent kind to its attention rule.
///
/// Kinds without an entry fall back to [`AttentionRule::Vocabulary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionRegistry {
    rules: BTreeMap<AgentKind, AttentionRule>,
}

impl AttentionRegistry {
    /// A registry with no dedicated rules.
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Register (or replace) the rule for `kind`.
    pub fn register(&mut self, kind: AgentKind, rule: AttentionRule) -> &mut Self {
        self.rules.insert(kind, rule);
        self
    }

    /// The rule for `kind`.
    pub fn rule(&self, kind: AgentKind) -> AttentionRule {
        self.rules
            .get(&kind)
            .copied()
            .unwrap_or(AttentionRule::Vocabulary)
    }

    /// Rows of `agent` that need attention, in their original order.
    pub fn needs_attention(&self, agent: &Agent) -> Vec<Row> {
        let rule = self.rule(agent.kind());
        agent
            .rows
            .iter()
            .filter(|row| rule.matches(row))
            .cloned()
            .collect()
    }

    /// Attention items for `agent`, indexed within the filtered list.
    pub fn attention_items(&self, agent: &Agent) -> Vec<AttentionItem> {
        let rule = self.rule(agent.kind());
        agent
            .rows
            .iter()
            .filter(|row| rule.matches(row))
            .enumerate()
            .map(|(index, row)| rule.describe(row, index))
            .collect()
    }
}

impl Default for AttentionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in AgentKind::KNOWN {
            registry.register(kind, AttentionRule::for_kind(kind));
        }
        registry
    }
}

/// Rows of `agent` that need attention, using the default rules.
pub fn needs_attention(agent: &Agent) -> Vec<Row> {
    AttentionRegistry::default().needs_attention(agent)
}

/// Summarise `row` of an agent of `kind` as the `index`-th attention item.
pub fn describe_attention_item(row: &Row, kind: AgentKind, index: usize) -> AttentionItem {
    AttentionRegistry::default().rule(kind).describe(row, index)
}

#[cfg(test)]
mod tests {
    use dentaliq_types::AgentId;

    use super::*;
    use crate::roster::default_agents;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn agent(id: &str, rows: Vec<Row>) -> Agent {
        Agent {
            id: AgentId::from(id),
            name: id.to_owned(),
            role: String::new(),
            avatar: "👤".to_owned(),
            notification: None,
            kpis: Vec::new(),
            mini_kpis: Vec::new(),
            rows,
            simulation_tasks: Vec::new(),
        }
    }

    #[test]
    fn isabella_callback_is_flagged() {
        let flagged = row(&[("Výsledek", "📞 Čeká na zpětné volání")]);
        let settled = row(&[("Výsledek", "Vyřízeno")]);
        let a = agent("isabella", vec![flagged.clone(), settled]);
        assert_eq!(needs_attention(&a), vec![flagged]);
    }

    #[test]
    fn auditor_rows_are_all_flagged() {
        let rows = vec![
            row(&[("Pacient", "Jan Novák"), ("Problém", "Vše v pořádku")]),
            row(&[("Pacient", "Eva Malá")]),
            row(&[]),
        ];
        let a = agent("auditor", rows.clone());
        assert_eq!(needs_attention(&a), rows);
    }

    #[test]
    fn gabriel_found_flag_or_warning() {
        let found_row = row(&[("Zjištěno", "Ano"), ("Komentář", "✅ Zpracováno")]);
        let warn_row = row(&[("Zjištěno", "Ne"), ("Komentář", "⚠️ Pozor")]);
        let quiet = row(&[("Zjištěno", "Ne"), ("Komentář", "✅ Zpracováno automaticky")]);
        let a = agent("gabriel", vec![quiet, found_row.clone(), warn_row.clone()]);
        assert_eq!(needs_attention(&a), vec![found_row, warn_row]);
    }

    #[test]
    fn leo_status_markers() {
        let queued = row(&[("Soubor", "a.pdf"), ("Status", "⏳ Ve frontě")]);
        let ok = row(&[("Soubor", "b.pdf"), ("Status", "✅ Nahráno")]);
        let a = agent("leo", vec![ok, queued.clone()]);
        assert_eq!(needs_attention(&a), vec![queued]);
    }

    #[test]
    fn nora_minor_issue_markers() {
        let minor = row(&[("Pacient", "Lucie Malá"), ("Shrnutí", "Drobné záněty")]);
        let clean = row(&[("Pacient", "Eva Dvořáková"), ("Shrnutí", "Bez kazů")]);
        let a = agent("nora", vec![clean, minor.clone()]);
        assert_eq!(needs_attention(&a), vec![minor]);
    }

    #[test]
    fn unknown_kind_uses_vocabulary_only() {
        let flagged = row(&[("Stav", "Pending review")]);
        let plain = row(&[("Stav", "Hotovo")]);
        let a = agent("custom-agent", vec![plain, flagged.clone()]);
        assert_eq!(needs_attention(&a), vec![flagged]);
    }

    #[test]
    fn vocabulary_is_case_insensitive() {
        let flagged = row(&[("Poznámka", "CHYBÍ podpis")]);
        assert!(AttentionRule::Vocabulary.matches(&flagged));
    }

    #[test]
    fn english_aliases_are_accepted() {
        let flagged = row(&[("result", "⏳ waiting")]);
        assert!(AttentionRule::CallResult.type_marker(&flagged));
        let found_row = row(&[("FOUND", "yes")]);
        assert!(AttentionRule::EmailTriage.type_marker(&found_row));
    }

    #[test]
    fn filtered_rows_preserve_order() {
        let rows: Vec<Row> = (0..6)
            .map(|i| {
                let status = if i % 2 == 0 { "⚠️ Chybí příloha" } else { "✅ Nahráno" };
                row(&[("Soubor", &format!("card_{i}.pdf")), ("Status", status)])
            })
            .collect();
        let a = agent("leo", rows);
        let names: Vec<String> = needs_attention(&a)
            .iter()
            .map(|r| field(r, &["Soubor"]).to_owned())
            .collect();
        assert_eq!(names, vec!["card_0.pdf", "card_2.pdf", "card_4.pdf"]);
    }

    #[test]
    fn describe_isabella_uses_fallback() {
        let r = row(&[
            ("Pacient", "Tereza Kučerová"),
            ("Důvod hovoru", "Zrušení termínu"),
            ("Požadavek", "Zrušit"),
            ("Čas", "13:30"),
            ("Výsledek", "⏳ Čeká na potvrzení SMS"),
            ("Popis problému", ""),
        ]);
        let item = describe_attention_item(&r, AgentKind::Isabella, 2);
        assert_eq!(item.patient_name, "Tereza Kučerová");
        assert_eq!(
            item.context,
            "Zrušení termínu • Zrušit • 13:30 • ⏳ Čeká na potvrzení SMS"
        );
        assert_eq!(
            item.problem_description,
            "Hovor vyžaduje další akci: ⏳ Čeká na potvrzení SMS"
        );
        assert_eq!(item.index, 2);
        assert_eq!(item.source_row, r);
    }

    #[test]
    fn describe_prefers_explicit_problem() {
        let r = row(&[
            ("Odesílatel", "patient15@mail.cz"),
            ("Téma", "Dotaz na pojištění"),
            ("Zjištěno", "Ano"),
            ("Komentář", "⚠️ Vyžaduje reakci"),
            ("Popis problému", "Zkontrolujte pojištění."),
        ]);
        let item = describe_attention_item(&r, AgentKind::Gabriel, 0);
        assert_eq!(item.patient_name, "patient15@mail.cz");
        assert_eq!(
            item.context,
            "Dotaz na pojištění • Zjištěno: Ano • ⚠️ Vyžaduje reakci"
        );
        assert_eq!(item.problem_description, "Zkontrolujte pojištění.");
    }

    #[test]
    fn describe_skips_empty_context_parts() {
        let r = row(&[("Soubor", "x.pdf"), ("Status", "⚠️ Chybí příloha"), ("Velikost", "")]);
        let item = describe_attention_item(&r, AgentKind::Leo, 0);
        assert_eq!(item.context, "⚠️ Chybí příloha");
        assert_eq!(item.problem_description, "Karta vyžaduje akci: ⚠️ Chybí příloha");
    }

    #[test]
    fn describe_auditor() {
        let r = row(&[
            ("Pacient", "Eva Malá"),
            ("Problém", "Chybějící rentgen"),
            ("Priorita", "Nízká"),
            ("Link", "https://dentalsystem.cz/record/4"),
        ]);
        let item = describe_attention_item(&r, AgentKind::Auditor, 0);
        assert_eq!(item.context, "Chybějící rentgen • Priorita: Nízká");
        assert_eq!(item.problem_description, "Nalezen problém: Chybějící rentgen");
    }

    #[test]
    fn describe_vocabulary_only_match_quotes_value() {
        // Summary is clean, but the insurer column carries an indicator.
        let r = row(&[
            ("Pacient", "Jan Šimek"),
            ("Pojišťovna", "Chybí"),
            ("Shrnutí", "Bez kazů"),
        ]);
        let item = describe_attention_item(&r, AgentKind::Nora, 0);
        assert_eq!(item.problem_description, "Vyžaduje pozornost: Chybí");
    }

    #[test]
    fn describe_unknown_kind() {
        let r = row(&[
            ("Soubor", "scan.png"),
            ("Stav", "Chybí"),
            ("velikost", "12 kB"),
            ("LINK", "https://dentalsystem.cz/file/9"),
            ("Poznámka", ""),
        ]);
        let item = describe_attention_item(&r, AgentKind::Other, 4);
        assert_eq!(item.patient_name, "scan.png");
        assert_eq!(item.context, "Stav: Chybí");
        assert_eq!(item.problem_description, "Vyžaduje pozornost: Chybí");
    }

    #[test]
    fn english_status_words_are_not_indicators() {
        let registry = AttentionRegistry::default();
        let a = agent(
            "archiv",
            vec![row(&[("Stav", "error")]), row(&[("Stav", "failed, pending")])],
        );
        assert!(registry.needs_attention(&a).is_empty());
    }

    #[test]
    fn unknown_kind_subject_fallbacks() {
        let first_value = row(&[("Kód", "A-17"), ("Stav", "Čeká")]);
        let item = describe_attention_item(&first_value, AgentKind::Other, 0);
        assert_eq!(item.patient_name, "A-17");

        let empty = row(&[("Kód", " ")]);
        let item = describe_attention_item(&empty, AgentKind::Other, 6);
        assert_eq!(item.patient_name, "Záznam #7");
    }

    #[test]
    fn registry_override() {
        let mut registry = AttentionRegistry::default();
        registry.register(AgentKind::Nora, AttentionRule::AuditAll);
        let a = agent("nora", vec![row(&[("Shrnutí", "Bez kazů")])]);
        assert_eq!(registry.needs_attention(&a).len(), 1);
        assert_eq!(AttentionRegistry::empty().rule(AgentKind::Leo), AttentionRule::Vocabulary);
    }

    #[test]
    fn roster_attention_counts() {
        let registry = AttentionRegistry::default();
        let counts: Vec<(String, usize)> = default_agents()
            .iter()
            .map(|a| (a.id.to_string(), registry.needs_attention(a).len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("isabella".to_owned(), 2),
                ("leo".to_owned(), 2),
                ("gabriel".to_owned(), 4),
                ("nora".to_owned(), 2),
                ("auditor".to_owned(), 5),
            ]
        );
    }

    #[test]
    fn attention_items_are_indexed_in_filtered_order() {
        let registry = AttentionRegistry::default();
        let roster = default_agents();
        let leo = roster.iter().find(|a| a.id == "leo");
        let items = leo.map(|a| registry.attention_items(a)).unwrap_or_default();
        let indexed: Vec<(usize, &str)> = items
            .iter()
            .map(|i| (i.index, i.patient_name.as_str()))
            .collect();
        assert_eq!(
            indexed,
            vec![(0, "patient_card_3.pdf"), (1, "patient_card_6.pdf")]
        );
    }
}
