use std::io::{self, BufRead, Write};

use quiz_core::model::{ChoiceId, QuizSet};
use services::QuizFlow;
use services::QuizModal;
use ui::nav::window_close_prompt;
use ui::vm::{IntentEffect, QuizIntent, apply_intent, map_quiz, quiz_text_to_plain};

/// Option label for a 0-based position: `a`..`z`, then `aa`, `ab`, ...
fn choice_label(position: usize) -> String {
    let mut n = position + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    label.into_iter().rev().collect()
}

/// Inverse of `choice_label`.
fn label_position(label: &str) -> Option<usize> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    let n = label.bytes().try_fold(0_usize, |acc, b| {
        acc.checked_mul(26)?.checked_add(usize::from(b - b'a') + 1)
    })?;
    n.checked_sub(1)
}

/// How an interactive attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Advanced,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Intent(QuizIntent),
    Show,
    Help,
}

fn parse_command(line: &str, flow: &QuizFlow) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    let command = match line.as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "finish" | "f" => Command::Intent(QuizIntent::Finish),
        "go" => Command::Intent(QuizIntent::SubmitAndGo),
        "exit" | "quit" | "q" => Command::Intent(QuizIntent::Exit),
        "run" => Command::Intent(QuizIntent::Execute),
        "y" | "yes" => match flow.modal() {
            QuizModal::FinishConfirmation => Command::Intent(QuizIntent::ConfirmFinish),
            QuizModal::ExitConfirmation => Command::Intent(QuizIntent::ConfirmExit),
            QuizModal::None => return None,
        },
        "n" | "no" => match flow.modal() {
            QuizModal::FinishConfirmation => Command::Intent(QuizIntent::CancelFinish),
            QuizModal::ExitConfirmation => Command::Intent(QuizIntent::CancelExit),
            QuizModal::None => return None,
        },
        other => return parse_answer(other, flow),
    };
    Some(command)
}

/// `"2b"` or `"2 b"`: question number (1-based) then option label.
fn parse_answer(raw: &str, flow: &QuizFlow) -> Option<Command> {
    let split = raw.find(|c: char| !c.is_ascii_digit())?;
    let (number, label) = raw.split_at(split);
    let number: usize = number.parse().ok()?;
    let position = label_position(label.trim())?;

    let question = number.checked_sub(1)?;
    let choice: ChoiceId = flow.session().question(question)?.choices.get(position)?.id;
    Some(Command::Intent(QuizIntent::SelectAnswer { question, choice }))
}

fn render(quiz: &QuizSet, flow: &QuizFlow, out: &mut impl Write) -> io::Result<()> {
    let vm = map_quiz(quiz.title(), quiz.description(), flow);
    writeln!(out, "== {} ==", vm.title)?;
    if !vm.description_html.is_empty() {
        writeln!(out, "{}", quiz_text_to_plain(quiz.description()))?;
    }
    if !vm.progress.is_submitted {
        writeln!(
            out,
            "Answered {} of {} questions.",
            vm.progress.answered, vm.progress.total
        )?;
    }
    for (question, planned) in vm.questions.iter().zip(flow.session().questions()) {
        writeln!(out, "\n{}. {}", question.number, quiz_text_to_plain(&planned.text))?;
        for (position, (choice, planned_choice)) in
            question.choices.iter().zip(&planned.choices).enumerate()
        {
            let marker = if choice.selected { "*" } else { " " };
            writeln!(
                out,
                "  [{marker}] {}) {}",
                choice_label(position),
                quiz_text_to_plain(planned_choice.text())
            )?;
        }
        if let Some(validation) = &question.validation {
            writeln!(out, "  -> {}", validation.message)?;
        }
    }
    if !vm.status_message.is_empty() {
        writeln!(out, "\n{}", vm.status_message)?;
    }
    match vm.modal {
        QuizModal::FinishConfirmation => {
            writeln!(out, "\nFinish the quiz? Answers cannot be changed afterwards. [y/n]")?;
        }
        QuizModal::ExitConfirmation => {
            writeln!(out, "\nExit the quiz? Your answers will be lost. [y/n]")?;
        }
        QuizModal::None => {}
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  2b       answer question 2 with option b")?;
    writeln!(out, "  finish   finish the quiz (asks for confirmation)")?;
    writeln!(out, "  go       submit and continue after passing")?;
    writeln!(out, "  run      finish, or continue once passed")?;
    writeln!(out, "  exit     leave the quiz (asks for confirmation)")?;
    writeln!(out, "  show     print the quiz again")
}

/// Drive one attempt from line-based input until the learner advances or leaves.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing output.
pub fn run_interactive(
    quiz: &QuizSet,
    flow: &mut QuizFlow,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<RunEnd> {
    render(quiz, flow, out)?;
    print_help(out)?;

    let mut line = String::new();
    loop {
        line.clear();
        write!(out, "> ")?;
        out.flush()?;
        if input.read_line(&mut line)? == 0 {
            // end of input behaves like closing the window
            if let Some(warning) = window_close_prompt(flow) {
                writeln!(out, "\n{warning}")?;
            }
            return Ok(RunEnd::Left);
        }

        let Some(command) = parse_command(&line, flow) else {
            writeln!(out, "Unrecognized command. Type `help` for options.")?;
            continue;
        };

        let intent = match command {
            Command::Show => {
                render(quiz, flow, out)?;
                continue;
            }
            Command::Help => {
                print_help(out)?;
                continue;
            }
            Command::Intent(intent) => intent,
        };

        match apply_intent(flow, intent) {
            Ok(IntentEffect::AdvanceToNext(_)) => {
                writeln!(out, "Well done! Moving on to the next unit.")?;
                return Ok(RunEnd::Advanced);
            }
            Ok(IntentEffect::LeaveQuiz) => return Ok(RunEnd::Left),
            Ok(IntentEffect::Graded(_) | IntentEffect::ShowUnanswered(_) | IntentEffect::Render) => {
                render(quiz, flow, out)?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::PassingGrade;
    use quiz_core::model::{QuizQuestionDraft, QuizSetDraft, QuizVariantDraft};
    use services::{NoopReporter, QuizSession, QuizSettings};
    use std::io::Cursor;
    use std::sync::Arc;

    fn quiz_with(distractors: Vec<String>) -> QuizSet {
        QuizSetDraft {
            title: "Terminal".to_string(),
            description: "Warm-up round.".to_string(),
            variants: vec![QuizVariantDraft {
                questions: vec![QuizQuestionDraft {
                    text: "Pick `yes`".to_string(),
                    answer: "yes".to_string(),
                    distractors,
                }],
            }],
        }
        .validate()
        .unwrap()
    }

    fn quiz() -> QuizSet {
        quiz_with(vec!["no".to_string(), "maybe".to_string()])
    }

    fn flow(quiz: &QuizSet) -> QuizFlow {
        let mut rng = QuizSettings::new(PassingGrade::default(), Some(3)).rng();
        let session = QuizSession::initialize(quiz, PassingGrade::default(), &mut rng).unwrap();
        QuizFlow::new(session, Arc::new(NoopReporter))
    }

    fn correct_label(flow: &QuizFlow) -> String {
        let question = flow.session().question(0).unwrap();
        let position = question.choices.iter().position(|c| c.is_correct).unwrap();
        choice_label(position)
    }

    #[test]
    fn labels_continue_past_z() {
        assert_eq!(choice_label(0), "a");
        assert_eq!(choice_label(25), "z");
        assert_eq!(choice_label(26), "aa");
        assert_eq!(choice_label(27), "ab");
        assert_eq!(choice_label(26 * 27), "aaa");
        for position in [0, 1, 25, 26, 51, 52, 701, 702] {
            assert_eq!(label_position(&choice_label(position)), Some(position));
        }
        assert_eq!(label_position(""), None);
        assert_eq!(label_position("a1"), None);
    }

    #[test]
    fn every_option_of_a_long_question_is_shown_and_selectable() {
        let quiz = quiz_with((1..=29).map(|n| format!("option {n}")).collect());
        let flow = flow(&quiz);
        let last = flow.session().question(0).unwrap().choices[29].id;

        assert_eq!(
            parse_command("1ad", &flow),
            Some(Command::Intent(QuizIntent::SelectAnswer {
                question: 0,
                choice: last
            }))
        );

        let mut out = Vec::new();
        render(&quiz, &flow, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("] ad) "));
    }

    #[test]
    fn parses_answer_commands() {
        let flow = flow(&quiz());
        let expected = flow.session().question(0).unwrap().choices[1].id;
        assert_eq!(
            parse_command("1b", &flow),
            Some(Command::Intent(QuizIntent::SelectAnswer {
                question: 0,
                choice: expected
            }))
        );
        assert_eq!(parse_command(" 1 B ", &flow), parse_command("1b", &flow));
        assert_eq!(parse_command("2a", &flow), None);
        assert_eq!(parse_command("1z", &flow), None);
        assert_eq!(parse_command("0a", &flow), None);
    }

    #[test]
    fn yes_without_dialog_is_rejected() {
        assert_eq!(parse_command("yes", &flow(&quiz())), None);
    }

    #[test]
    fn render_shows_description_and_progress() {
        let quiz = quiz();
        let flow = flow(&quiz);
        let mut out = Vec::new();
        render(&quiz, &flow, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("== Terminal ==\nWarm-up round.\n"));
        assert!(text.contains("Answered 0 of 1 questions."));
    }

    #[test]
    fn full_run_advances_after_passing() {
        let quiz = quiz();
        let mut flow = flow(&quiz);
        let script = format!("finish\n1{}\nfinish\ny\ngo\n", correct_label(&flow));
        let mut out = Vec::new();

        let end = run_interactive(&quiz, &mut flow, &mut Cursor::new(script), &mut out).unwrap();

        assert_eq!(end, RunEnd::Advanced);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("The following questions are unanswered: 1."));
        assert!(text.contains("Answered 1 of 1 questions."));
        assert!(text.contains("You have 1 out of 1 questions correct."));
        assert!(text.contains("Moving on to the next unit."));
    }

    #[test]
    fn end_of_input_before_submission_warns() {
        let quiz = quiz();
        let mut flow = flow(&quiz);
        let mut out = Vec::new();
        let end = run_interactive(&quiz, &mut flow, &mut Cursor::new(""), &mut out).unwrap();
        assert_eq!(end, RunEnd::Left);
        assert!(String::from_utf8(out).unwrap().contains(ui::NAVIGATION_WARNING));
    }

    #[test]
    fn exit_needs_confirmation() {
        let quiz = quiz();
        let mut flow = flow(&quiz);
        let mut out = Vec::new();
        let end = run_interactive(
            &quiz,
            &mut flow,
            &mut Cursor::new("exit\nn\nexit\ny\n"),
            &mut out,
        )
        .unwrap();
        assert_eq!(end, RunEnd::Left);
        assert!(String::from_utf8(out).unwrap().contains("Exit the quiz?"));
    }
}
