//! Random record generation for simulation mode.
//!
//! When simulation is active the host appends freshly generated rows to
//! the simulated agent on every load. About three in four generated rows
//! are clean; the rest carry the markers the attention rules look for,
//! together with a problem description.

use dentaliq_types::{AgentKind, Row};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::attention::PROBLEM_KEY;

const CZECH_NAMES: &[&str] = &[
    "Jan Novák",
    "Petra Dvořáková",
    "Lukáš Beneš",
    "Eva Kovářová",
    "Martin Svoboda",
    "Tereza Kučerová",
    "Pavel Černý",
    "Jana Malá",
    "Tomáš Dvořák",
    "Eva Malá",
    "Lukáš Černý",
    "Markéta Svobodová",
    "Tomáš Veselý",
    "Petr Novák",
    "Tereza Jelínková",
    "Milan Novotný",
    "Lucie Malá",
    "Jan Šimek",
];

const CALL_REASONS: &[&str] = &[
    "Hygiena",
    "Kontrola",
    "Bolest",
    "Rentgen",
    "Nový pacient",
    "Zrušení termínu",
];

const REQUESTS: &[&str] = &["Objednat", "Zrušit", "Přesunout", "Informace"];

const EMAIL_ISSUES: &[&str] = &[
    "Zrušení termínu",
    "Neodpovězený e-mail",
    "Dotaz na pojištění",
    "Pozdní potvrzení",
    "Přeposlaný mail",
];

const INSURANCES: &[&str] = &["VZP", "OZP", "ZPMV", "ČPZP"];

const FINDINGS_POSITIVE: &[&str] = &["Bez kazů", "Doporučena hygiena"];

const FINDINGS_OTHER: &[&str] = &["Drobné záněty", "Nutná kontrola"];

const AUDIT_ISSUES: &[(&str, &str)] = &[
    (
        "Chybí podpis lékaře",
        "V záznamu pacienta chybí povinný podpis ošetřujícího lékaře. Zkontrolujte dokumentaci a zajistěte doplnění podpisu.",
    ),
    (
        "Nesoulad fakturace",
        "Byl zjištěn nesoulad mezi provedenými zákroky a fakturovanými položkami. Je nutné zkontrolovat fakturaci a opravit chyby.",
    ),
    (
        "Neúplná anamnéza",
        "Anamnéza pacienta je neúplná - chybí některé povinné údaje. Doplňte chybějící informace do anamnézy.",
    ),
    (
        "Chybějící rentgen",
        "K záznamu pacienta chybí rentgenový snímek, který byl zmíněn v dokumentaci. Zkontrolujte, zda byl snímek nahrán.",
    ),
    (
        "Duplicitní záznam",
        "Byl nalezen duplicitní záznam pro stejného pacienta. Zkontrolujte oba záznamy a odstraňte nebo sloučte duplicitní záznam.",
    ),
];

const PRIORITIES: &[&str] = &["Vysoká", "Střední", "Nízká"];

const MINUTES: &[&str] = &["00", "15", "30", "45"];

/// Probability that a generated row is clean.
const CLEAN_RATIO: f64 = 0.75;

/// Pick one element of a non-empty pool.
fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn make_row<const N: usize>(pairs: [(&str, String); N]) -> Row {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect()
}

/// Generates sample rows for each agent kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSimulator;

impl DataSimulator {
    /// Generate `count` rows for an agent of `kind`.
    ///
    /// Agents without a dedicated kind get no simulated rows.
    pub fn simulate<R: Rng + ?Sized>(self, kind: AgentKind, count: usize, rng: &mut R) -> Vec<Row> {
        (0..count)
            .filter_map(|i| match kind {
                AgentKind::Isabella => Some(Self::call(rng)),
                AgentKind::Gabriel => Some(Self::email(rng)),
                AgentKind::Leo => Some(Self::card(i, rng)),
                AgentKind::Nora => Some(Self::summary(rng)),
                AgentKind::Auditor => Some(Self::audit(i, rng)),
                AgentKind::Other => None,
            })
            .collect()
    }

    /// Phone reception record.
    fn call<R: Rng + ?Sized>(rng: &mut R) -> Row {
        let (result, problem) = if rng.random_bool(CLEAN_RATIO) {
            ("✅ Rezervace potvrzena", "")
        } else if rng.random_bool(0.5) {
            (
                "📞 Přepojeno na recepci",
                "Hovor byl přepojen na recepci. Zkontrolujte, zda byl problém vyřešen a zda pacient obdržel potřebné informace.",
            )
        } else {
            (
                "⏳ Čeká na potvrzení SMS",
                "SMS potvrzení nebylo dosud doručeno. Zkontrolujte stav odeslání a v případě potřeby znovu odešlete potvrzovací SMS zprávu.",
            )
        };
        let hour: u8 = rng.random_range(8..=17);
        make_row([
            ("Pacient", pick(rng, CZECH_NAMES).to_owned()),
            ("Důvod hovoru", pick(rng, CALL_REASONS).to_owned()),
            ("Požadavek", pick(rng, REQUESTS).to_owned()),
            ("Čas", format!("{hour}:{}", pick(rng, MINUTES))),
            ("Výsledek", result.to_owned()),
            (PROBLEM_KEY, problem.to_owned()),
        ])
    }

    /// E-mail triage record.
    fn email<R: Rng + ?Sized>(rng: &mut R) -> Row {
        let found = if rng.random_bool(CLEAN_RATIO) { "Ne" } else { "Ano" };
        let comment = if rng.random_bool(0.5) {
            "⚠️ Vyžaduje reakci"
        } else {
            "✅ Zpracováno automaticky"
        };
        let topic = pick(rng, EMAIL_ISSUES);
        let problem = if comment.starts_with('⚠') || found == "Ano" {
            if topic.contains("pojištění") {
                "Pacient se dotazuje na krytí pojišťovnou. Zkontrolujte jeho pojištění a odpovězte s přesnými informacemi o hrazení léčby."
            } else if topic.starts_with("Neodpovězený") {
                "E-mail od pacienta zůstal neodpovězený déle než 48 hodin. Je nutné neprodleně odpovědět a omluvit se za zpoždění."
            } else {
                "E-mail vyžaduje okamžitou pozornost. Zkontrolujte obsah a odpovězte pacientovi co nejdříve."
            }
        } else {
            ""
        };
        let sender: u8 = rng.random_range(1..=50);
        make_row([
            ("Odesílatel", format!("patient{sender}@mail.cz")),
            ("Téma", topic.to_owned()),
            ("Zjištěno", found.to_owned()),
            ("Komentář", comment.to_owned()),
            (PROBLEM_KEY, problem.to_owned()),
        ])
    }

    /// Patient summary record.
    fn summary<R: Rng + ?Sized>(rng: &mut R) -> Row {
        let clean = rng.random_bool(CLEAN_RATIO);
        let finding = pick(rng, if clean { FINDINGS_POSITIVE } else { FINDINGS_OTHER });
        let problem = if clean {
            String::new()
        } else {
            format!(
                "U pacienta byly zjištěny {}. Je potřeba zkontrolovat kompletní anamnézu a doporučit vhodnou léčbu nebo preventivní opatření.",
                finding.to_lowercase()
            )
        };
        let minutes: u8 = rng.random_range(1..=6);
        make_row([
            ("Pacient", pick(rng, CZECH_NAMES).to_owned()),
            ("Pojišťovna", pick(rng, INSURANCES).to_owned()),
            ("Shrnutí", finding.to_owned()),
            ("Čas přípravy", format!("{minutes} min")),
            (PROBLEM_KEY, problem),
        ])
    }

    /// Patient card record; `index` numbers the file.
    fn card<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Row {
        let (status, problem) = if rng.random_bool(CLEAN_RATIO) {
            ("✅ Nahráno", "")
        } else if rng.random_bool(0.5) {
            (
                "⚠️ Chybí příloha",
                "V karetě pacienta chybí povinná příloha. Zkontrolujte dokumentaci a doplňte chybějící přílohu před archivací.",
            )
        } else {
            (
                "⏳ Ve frontě",
                "Karta pacienta čeká ve frontě na zpracování již delší dobu. Zkontrolujte, zda nedošlo k chybě při importu.",
            )
        };
        let size: u16 = rng.random_range(120..=1200);
        let archive: u8 = rng.random_range(1..=4);
        make_row([
            ("Soubor", format!("patient_card_{}.pdf", index.saturating_add(1))),
            ("Status", status.to_owned()),
            ("Velikost", format!("{size} kB")),
            ("Archiv", format!("archiv_{archive}")),
            (PROBLEM_KEY, problem.to_owned()),
        ])
    }

    /// Audit finding; `index` numbers the record link.
    fn audit<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Row {
        let (problem, description) = AUDIT_ISSUES
            .choose(rng)
            .copied()
            .unwrap_or(("Duplicitní záznam", ""));
        make_row([
            ("Pacient", pick(rng, CZECH_NAMES).to_owned()),
            ("Problém", problem.to_owned()),
            ("Priorita", pick(rng, PRIORITIES).to_owned()),
            (
                "Link",
                format!("https://dentalsystem.cz/record/{}", index.saturating_add(1)),
            ),
            (PROBLEM_KEY, description.to_owned()),
        ])
    }
}
