use crate::client::QuizApi;
use crate::libarena::locale::Localization;
use crate::libarena::play::{
    load_question, submit_answer, CheckOutcome, Feedback, NextStep, QuizController, RequestTag,
    Screen, Selection,
};
use colored::Colorize;
use log::debug;
use std::io::{self, Write};
use text_io::read;

#[derive(Debug, PartialEq)]
enum Choice {
    Option(usize),
    Invalid,
    Quit,
}

impl Choice {
    fn from_str(choices_count: usize, input: &str) -> Choice {
        match input.trim() {
            "q" => Choice::Quit,
            input => match input.parse::<usize>() {
                Ok(num) if num >= 1 && num <= choices_count => Choice::Option(num - 1),
                Ok(_) => {
                    println!(
                        "{}",
                        format!("There are only {} options available!", choices_count)
                            .bright_red()
                    );
                    Choice::Invalid
                }
                Err(_) => Choice::Invalid,
            },
        }
    }
}

fn print_screen(controller: &QuizController, locale: &Localization) {
    let text = locale.translations();
    let session = controller.session();
    match controller.screen() {
        Screen::Menu => {
            println!("{}", "==========> Brain Arena <==========".cyan());
            println!("{}", text.menu.tagline.italic());
        }
        Screen::Loading => println!("{}", "...".dimmed()),
        Screen::Question => {
            if let Some(question) = controller.question() {
                let leading = format!("{}. ", session.progress_label_with(text.game.question));
                println!(
                    "{}{}",
                    leading.cyan(),
                    format!(" {} ({}) ", question.text, question.difficulty)
                        .black()
                        .bold()
                        .on_white()
                );
            }
        }
        Screen::ConnectionError => println!("{}", text.errors.connection_error.bright_red()),
        Screen::Victory => {
            println!("{}", text.game.victory.bright_green().bold());
            println!("{}", text.game.victory_message.green());
        }
        Screen::GameOver => {
            println!("{}", text.game.game_over.bright_red().bold());
            println!("{}", text.game.game_over_message.red());
        }
    }
}

fn print_choices(controller: &QuizController, locale: &Localization) -> usize {
    let choices = controller.choices(locale.translations());
    let feedback: &[Feedback] = match controller.screen() {
        Screen::Question => controller.feedback(),
        _ => &[],
    };
    for (i, label) in choices.iter().enumerate() {
        let label = match feedback.get(i) {
            Some(Feedback::Selected) => label.yellow().bold(),
            Some(Feedback::Correct) => label.bright_green().bold(),
            Some(Feedback::Incorrect) => label.bright_red().strikethrough(),
            _ => label.normal(),
        };
        println!("   {}. {}", format!("{}", i + 1).bold(), label);
    }
    choices.len()
}

fn print_feedback(controller: &QuizController) {
    if let Some(question) = controller.question() {
        for (option, feedback) in question.options.iter().zip(controller.feedback()) {
            match feedback {
                Feedback::Correct => println!("   {} {}", "✔".bright_green(), option.bright_green()),
                Feedback::Incorrect => println!("   {} {}", "✘".bright_red(), option.bright_red()),
                _ => {}
            }
        }
    }
}

async fn load<A: QuizApi>(controller: &mut QuizController, api: &A, tag: RequestTag) {
    let outcome = load_question(controller, api, tag).await;
    debug!("[Quiz] Load outcome: {:?}", outcome);
}

/// Plays until the player exits from the main menu or types `q`.
pub async fn cli_loop<A: QuizApi>(
    api: &A,
    controller: &mut QuizController,
    locale: &mut Localization,
) {
    locale.on_language_change(|language| debug!("[Quiz] Language switched to {language}"));
    controller.show_main_menu();

    loop {
        print_screen(controller, locale);
        let choices_count = print_choices(controller, locale);
        if choices_count == 0 {
            return;
        }

        print!(
            "{} ",
            format!("Choice (1-{}, q to quit):", choices_count).cyan()
        );
        let _ = io::stdout().flush();
        let choice_string: String = read!("{}\n");
        let choice = Choice::from_str(choices_count, &choice_string);
        debug!("choice: {:?}", choice);

        let index = match choice {
            Choice::Option(index) => index,
            Choice::Invalid => continue,
            Choice::Quit => {
                println!("{}", "Quitting Early!".cyan());
                return;
            }
        };

        match controller.select_option(index) {
            Selection::Submit(submission) => {
                let outcome = submit_answer(controller, api, &submission).await;
                match outcome {
                    CheckOutcome::Failed => {
                        println!(
                            "{}",
                            locale.translations().errors.connection_error.bright_red()
                        );
                        continue;
                    }
                    CheckOutcome::Stale => continue,
                    CheckOutcome::Correct | CheckOutcome::Incorrect => print_feedback(controller),
                }
                if let Some(delay) = QuizController::feedback_delay(outcome) {
                    tokio::time::sleep(delay).await;
                }
                if let NextStep::LoadNext(tag) = controller.after_feedback(&submission) {
                    load(controller, api, tag).await;
                }
            }
            Selection::Load(tag) => load(controller, api, tag).await,
            Selection::ToggleLanguage => locale.toggle_language(),
            Selection::Exit => return,
            Selection::Menu | Selection::Ignored => {}
        }
    }
}
