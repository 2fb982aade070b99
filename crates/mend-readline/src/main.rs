use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;

use mend_application::{AssessmentDraft, SessionController};
use mend_core::MendError;
use mend_core::assessment::{
    CARE_SETTINGS, Expertise, InfectionStatus, Moisture, SUPPLY_OPTIONS, VISIT_FREQUENCIES,
    WoundImage, other_entry,
};
use mend_core::client::AssessmentClient;
use mend_interaction::OpenAiClient;

/// CLI helper for rustyline that provides completion, highlighting, and
/// hints for the follow-up commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec!["/back".to_string(), "/finish".to_string()],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

type Repl = Editor<CliHelper, DefaultHistory>;

/// Outcome of one interactive prompt.
enum PromptOutcome<T> {
    Value(T),
    /// Empty input with a previous answer on file; keep it.
    Keep,
    Quit,
}

/// What the user chose to do after reviewing the results.
enum ResultsAction {
    BackToInput,
    Finish,
}

/// Reads one line, looping on CTRL-C the way an interactive form should.
/// Returns `None` on EOF.
fn read_line(rl: &mut Repl, prompt: &str) -> Result<Option<String>> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => return Ok(Some(line)),
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }
}

/// Renders a remote failure at the presentation boundary, in place of the
/// expected result.
fn remote_error_banner(err: &MendError) -> String {
    format!("⚠️ Error calling the assessment service: {err}")
}

/// Parses a 1-based selection list such as "1,3,5" or "2 4".
fn parse_selection(input: &str, max: usize) -> Option<Vec<usize>> {
    let mut picks = Vec::new();
    for token in input.split(|c: char| c == ',' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let n: usize = token.parse().ok()?;
        if n == 0 || n > max {
            return None;
        }
        if !picks.contains(&(n - 1)) {
            picks.push(n - 1);
        }
    }
    if picks.is_empty() { None } else { Some(picks) }
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Shows the terms gate. Returns `false` if the user quit without
/// accepting; nothing else is reachable until this returns `true`.
fn show_terms<C: AssessmentClient>(
    rl: &mut Repl,
    controller: &mut SessionController<C>,
) -> Result<bool> {
    section("Terms and Conditions of Use");
    println!(
        "{}",
        "This AI wound-care tool is for research and educational purposes only.\n\
         It must not be used for medical diagnosis, treatment, or patient care,\n\
         including at home. Outputs may be incomplete or inconsistent and are\n\
         provided without any warranty. Do not upload identifiable patient or\n\
         personal health information."
            .bright_black()
    );
    println!();

    loop {
        let Some(line) = read_line(rl, "Do you accept these terms? (accept/decline) ")? else {
            return Ok(false);
        };

        match line.trim().to_lowercase().as_str() {
            "accept" | "yes" | "y" => {
                controller.accept_terms();
                return Ok(true);
            }
            "decline" | "no" | "n" => {
                controller.decline_terms();
                println!(
                    "{}",
                    "You must accept the terms to use this application.".red()
                );
            }
            "quit" | "exit" => return Ok(false),
            _ => println!("{}", "Please answer 'accept' or 'decline'.".yellow()),
        }
    }
}

/// Multi-select over the supply catalog, with an "Other" free-text entry.
fn prompt_supplies(rl: &mut Repl, draft: &mut AssessmentDraft) -> Result<bool> {
    section("1. Available Supplies");
    println!("{}", "Select all that apply (e.g. 1,3,8):".bright_black());
    for (i, option) in SUPPLY_OPTIONS.iter().enumerate() {
        println!("  {:2}. {}", i + 1, option);
    }
    let other_index = SUPPLY_OPTIONS.len() + 1;
    println!("  {:2}. Other", other_index);
    if !draft.supplies.is_empty() {
        println!(
            "{}",
            format!("(press Enter to keep: {})", draft.supplies.join(", ")).bright_black()
        );
    }

    loop {
        let Some(line) = read_line(rl, "> ")? else {
            return Ok(false);
        };
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }
        if trimmed.is_empty() && !draft.supplies.is_empty() {
            return Ok(true);
        }

        let Some(picks) = parse_selection(trimmed, other_index) else {
            println!(
                "{}",
                format!("Enter numbers between 1 and {other_index}, separated by commas.").yellow()
            );
            continue;
        };

        let mut supplies = Vec::new();
        for pick in &picks {
            if *pick == other_index - 1 {
                let Some(text) = read_line(rl, "Please specify other supplies: ")? else {
                    return Ok(false);
                };
                let text = text.trim().to_string();
                if !text.is_empty() {
                    supplies.push(other_entry(&text));
                }
            } else {
                supplies.push(SUPPLY_OPTIONS[*pick].to_string());
            }
        }

        if supplies.is_empty() {
            println!(
                "{}",
                "Please select at least one available supply.".yellow()
            );
            continue;
        }

        draft.supplies = supplies;
        return Ok(true);
    }
}

/// Single choice from a fixed list, optionally with an "Other" free-text
/// entry. Empty input keeps the current answer when one exists.
fn prompt_choice(
    rl: &mut Repl,
    heading: &str,
    question: &str,
    options: &[&str],
    allow_other: bool,
    current: Option<&str>,
) -> Result<PromptOutcome<String>> {
    section(heading);
    println!("{}", question.bright_black());
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    let count = if allow_other {
        println!("  {}. Other", options.len() + 1);
        options.len() + 1
    } else {
        options.len()
    };
    if let Some(current) = current {
        println!(
            "{}",
            format!("(press Enter to keep: {current})").bright_black()
        );
    }

    loop {
        let Some(line) = read_line(rl, "> ")? else {
            return Ok(PromptOutcome::Quit);
        };
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") {
            return Ok(PromptOutcome::Quit);
        }
        if trimmed.is_empty() && current.is_some() {
            return Ok(PromptOutcome::Keep);
        }

        match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 && n <= count => {
                if allow_other && n == count {
                    let Some(text) = read_line(rl, "Please specify: ")? else {
                        return Ok(PromptOutcome::Quit);
                    };
                    let text = text.trim().to_string();
                    if text.is_empty() {
                        println!("{}", "Please enter a value.".yellow());
                        continue;
                    }
                    return Ok(PromptOutcome::Value(other_entry(&text)));
                }
                return Ok(PromptOutcome::Value(options[n - 1].to_string()));
            }
            _ => println!(
                "{}",
                format!("Enter a number between 1 and {count}.").yellow()
            ),
        }
    }
}

/// Yes/no prompt for hospital willingness.
fn prompt_willingness(rl: &mut Repl, draft: &mut AssessmentDraft) -> Result<bool> {
    section("4. Hospital Access");
    println!(
        "{}",
        "Is the individual willing to go to hospital if needed? (yes/no)".bright_black()
    );
    if let Some(current) = draft.hospital_willingness {
        let label = if current { "Yes" } else { "No" };
        println!(
            "{}",
            format!("(press Enter to keep: {label})").bright_black()
        );
    }

    loop {
        let Some(line) = read_line(rl, "> ")? else {
            return Ok(false);
        };
        let trimmed = line.trim().to_lowercase();

        match trimmed.as_str() {
            "" if draft.hospital_willingness.is_some() => return Ok(true),
            "yes" | "y" => {
                draft.hospital_willingness = Some(true);
                return Ok(true);
            }
            "no" | "n" => {
                draft.hospital_willingness = Some(false);
                return Ok(true);
            }
            "quit" => return Ok(false),
            _ => println!("{}", "Please answer 'yes' or 'no'.".yellow()),
        }
    }
}

/// Prompts for the wound photo path and validates it immediately so the
/// user gets feedback before submitting.
fn prompt_image(rl: &mut Repl, draft: &mut AssessmentDraft) -> Result<bool> {
    section("8. Wound Photo");
    println!(
        "{}",
        "Path to a clear, well-lit photo of the wound (JPEG or PNG):".bright_black()
    );
    if let Some(current) = &draft.image_path {
        println!(
            "{}",
            format!("(press Enter to keep: {})", current.display()).bright_black()
        );
    }

    loop {
        let Some(line) = read_line(rl, "> ")? else {
            return Ok(false);
        };
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }
        if trimmed.is_empty() && draft.image_path.is_some() {
            return Ok(true);
        }
        if trimmed.is_empty() {
            println!("{}", "Please upload an image first.".yellow());
            continue;
        }

        let path = PathBuf::from(trimmed);
        match WoundImage::from_path(&path) {
            Ok(image) => {
                println!(
                    "{}",
                    format!(
                        "Uploaded image: {} ({} KB, {})",
                        path.display(),
                        image.len() / 1024,
                        image.mime_type()
                    )
                    .green()
                );
                draft.image_path = Some(path);
                return Ok(true);
            }
            Err(err) => println!("{}", err.to_string().yellow()),
        }
    }
}

/// Walks the questionnaire. Returns `false` if the user quit.
fn edit_draft(rl: &mut Repl, draft: &mut AssessmentDraft) -> Result<bool> {
    println!();
    println!("{}", "Input Parameters".bold().underline());

    if !prompt_supplies(rl, draft)? {
        return Ok(false);
    }

    match prompt_choice(
        rl,
        "2. Care Setting",
        "Where is the care being provided?",
        CARE_SETTINGS,
        true,
        draft.setting.as_deref(),
    )? {
        PromptOutcome::Value(setting) => draft.setting = Some(setting),
        PromptOutcome::Keep => {}
        PromptOutcome::Quit => return Ok(false),
    }

    let expertise_labels: Vec<String> = Expertise::iter().map(|e| e.to_string()).collect();
    let expertise_refs: Vec<&str> = expertise_labels.iter().map(String::as_str).collect();
    match prompt_choice(
        rl,
        "3. Provider Expertise",
        "What is your level of experience with wounds?",
        &expertise_refs,
        false,
        draft.expertise.map(|e| e.to_string()).as_deref(),
    )? {
        PromptOutcome::Value(label) => {
            draft.expertise = Expertise::iter().find(|e| e.to_string() == label);
        }
        PromptOutcome::Keep => {}
        PromptOutcome::Quit => return Ok(false),
    }

    if !prompt_willingness(rl, draft)? {
        return Ok(false);
    }

    match prompt_choice(
        rl,
        "5. Clinic Visits",
        "How often can the individual visit the clinic?",
        VISIT_FREQUENCIES,
        true,
        draft.visit_frequency.as_deref(),
    )? {
        PromptOutcome::Value(frequency) => draft.visit_frequency = Some(frequency),
        PromptOutcome::Keep => {}
        PromptOutcome::Quit => return Ok(false),
    }

    let infection_labels: Vec<String> = InfectionStatus::iter().map(|v| v.to_string()).collect();
    let infection_refs: Vec<&str> = infection_labels.iter().map(String::as_str).collect();
    match prompt_choice(
        rl,
        "6. Infection Status",
        "Does the wound show signs of infection?",
        &infection_refs,
        false,
        draft.infection.map(|v| v.to_string()).as_deref(),
    )? {
        PromptOutcome::Value(label) => {
            draft.infection = InfectionStatus::iter().find(|v| v.to_string() == label);
        }
        PromptOutcome::Keep => {}
        PromptOutcome::Quit => return Ok(false),
    }

    let moisture_labels: Vec<String> = Moisture::iter().map(|v| v.to_string()).collect();
    let moisture_refs: Vec<&str> = moisture_labels.iter().map(String::as_str).collect();
    match prompt_choice(
        rl,
        "7. Moisture Level",
        "What is the wound's moisture condition?",
        &moisture_refs,
        false,
        draft.moisture.map(|v| v.to_string()).as_deref(),
    )? {
        PromptOutcome::Value(label) => {
            draft.moisture = Moisture::iter().find(|v| v.to_string() == label);
        }
        PromptOutcome::Keep => {}
        PromptOutcome::Quit => return Ok(false),
    }

    prompt_image(rl, draft)
}

/// Prints the assessment the way the results page shows it.
fn print_assessment(text: &str) {
    println!();
    println!("{}", "Assessment Results".bold().underline());
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

/// The follow-up loop on the results page.
async fn run_follow_ups<C: AssessmentClient>(
    rl: &mut Repl,
    controller: &mut SessionController<C>,
) -> Result<ResultsAction> {
    section("Follow-up");
    println!(
        "{}",
        "Ask a question about the assessment, or use /back to edit the form, /finish to exit."
            .bright_black()
    );

    loop {
        let Some(line) = read_line(rl, ">> ")? else {
            return Ok(ResultsAction::Finish);
        };
        let trimmed = line.trim();

        match trimmed {
            "/finish" | "quit" | "exit" => return Ok(ResultsAction::Finish),
            "/back" => return Ok(ResultsAction::BackToInput),
            _ => {}
        }

        let _ = rl.add_history_entry(&line);
        println!("{}", "Getting assistant response...".bright_black());

        match controller.ask_follow_up(trimmed).await {
            Ok(pair) => {
                println!("{}", "Assistant response:".bright_magenta());
                for line in pair.answer.lines() {
                    println!("{}", line.bright_blue());
                }
                println!();
            }
            Err(err) if err.is_validation() => {
                println!("{}", err.to_string().yellow());
            }
            Err(err) => {
                println!("{}", remote_error_banner(&err).red());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("{}", "=== Mend Wound Care Assessment ===".bright_magenta().bold());
    println!(
        "{}",
        "Fill out the questionnaire, provide a wound photo, and receive a\n\
         personalized wound care plan. Type 'quit' at any prompt to exit."
            .bright_black()
    );

    // A missing credential is fatal before any interaction is possible
    let client = match OpenAiClient::try_from_env() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            return Ok(());
        }
    };

    let helper = CliHelper::new();
    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(helper));

    let mut controller = SessionController::new(client);

    if !show_terms(&mut rl, &mut controller)? {
        println!("{}", "Goodbye!".bright_green());
        return Ok(());
    }

    // The draft outlives each Results -> Input transition so the form
    // stays pre-filled when the user comes back to edit an answer.
    let mut draft = AssessmentDraft::default();

    loop {
        // Input page
        if !edit_draft(&mut rl, &mut draft)? {
            break;
        }

        let request = match draft.to_request() {
            Ok(request) => request,
            Err(err) => {
                println!("{}", err.to_string().yellow());
                continue;
            }
        };

        println!();
        println!("{}", "Analyzing image...".bright_black());

        match controller.submit_assessment(request).await {
            Ok(assessment) => {
                let text = assessment.text.clone();
                print_assessment(&text);
            }
            Err(err) if err.is_validation() => {
                println!("{}", err.to_string().yellow());
                continue;
            }
            Err(err) => {
                // Shown in place of the expected result; the session
                // stays on the input page and the user may retry
                println!("{}", remote_error_banner(&err).red());
                continue;
            }
        }

        // Results page
        match run_follow_ups(&mut rl, &mut controller).await? {
            ResultsAction::BackToInput => {
                controller.back_to_input()?;
            }
            ResultsAction::Finish => break,
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_accepts_commas_and_spaces() {
        assert_eq!(parse_selection("1,3,5", 13), Some(vec![0, 2, 4]));
        assert_eq!(parse_selection("2 4", 13), Some(vec![1, 3]));
        assert_eq!(parse_selection(" 7 ", 13), Some(vec![6]));
    }

    #[test]
    fn test_parse_selection_rejects_out_of_range() {
        assert_eq!(parse_selection("0", 13), None);
        assert_eq!(parse_selection("14", 13), None);
        assert_eq!(parse_selection("abc", 13), None);
        assert_eq!(parse_selection("", 13), None);
    }

    #[test]
    fn test_parse_selection_deduplicates() {
        assert_eq!(parse_selection("3,3,3", 13), Some(vec![2]));
    }

    #[test]
    fn test_remote_error_banner_reads_as_error() {
        let banner = remote_error_banner(&MendError::api_status(500, "server exploded"));
        assert!(banner.contains("⚠️"));
        assert!(banner.contains("Error calling the assessment service"));
        assert!(banner.contains("server exploded"));
    }
}
