//! Console presentation of session frames and results.

use comfy_table::{Cell, Color, Table};

use timequiz_core::results::QuizResult;
use timequiz_core::view::{option_letter, Frame, QuestionView, Reveal, SessionSnapshot, Urgency};
use timequiz_core::QuizSession;
use timequiz_store::Theme;

const PROGRESS_WIDTH: usize = 20;

/// Writes frames to stdout, coloured tables following the theme.
pub struct ConsoleRenderer {
    theme: Theme,
}

struct Palette {
    good: Color,
    bad: Color,
    accent: Color,
}

impl ConsoleRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> Palette {
        match self.theme {
            Theme::Dark => Palette {
                good: Color::Green,
                bad: Color::Red,
                accent: Color::Cyan,
            },
            Theme::Light => Palette {
                good: Color::DarkGreen,
                bad: Color::DarkRed,
                accent: Color::DarkBlue,
            },
        }
    }

    pub fn high_score_banner(&self, high_score: Option<u32>, total: usize) {
        if let Some(best) = high_score {
            println!("🏆 High Score: {best}/{total}");
        }
    }

    pub fn frame(&self, frame: &Frame, session: &QuizSession) {
        match frame {
            Frame::Question(view) => self.question(view),
            Frame::Tick { remaining, urgency } => self.tick(*remaining, *urgency),
            Frame::Revealed(reveal) => self.reveal(reveal, session),
            Frame::Finished(_) | Frame::Idle => {}
        }
    }

    pub fn invalid_input(&self) {
        println!("Answer with A-D (or 1-4), or q to quit.");
    }

    fn question(&self, view: &QuestionView) {
        let filled = (view.progress * PROGRESS_WIDTH as f64).round() as usize;
        println!();
        println!(
            "Question {}/{}  [{}{}]  Score: {}",
            view.number,
            view.total,
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH.saturating_sub(filled)),
            view.score
        );
        println!("{}", view.prompt);
        for option in &view.options {
            println!("  {}) {}", option.letter, option.text);
        }
        println!("⏱ {}s", view.remaining);
    }

    fn tick(&self, remaining: u32, urgency: Urgency) {
        match urgency {
            Urgency::Calm => {}
            Urgency::Warning if remaining == 10 => println!("⏱ {remaining}s left"),
            Urgency::Warning => {}
            Urgency::Danger if remaining > 0 => println!("⏱ {remaining}s left!"),
            Urgency::Danger => {}
        }
    }

    fn reveal(&self, reveal: &Reveal, session: &QuizSession) {
        let answer = session
            .questions()
            .get(reveal.question)
            .map(|q| format!("{}) {}", option_letter(reveal.correct), q.correct_text()))
            .unwrap_or_default();

        if reveal.is_correct() {
            println!("✓ Correct!");
        } else if reveal.timed_out() {
            println!("⏰ Time's up! The answer was {answer}");
        } else {
            println!("✗ Wrong. The answer was {answer}");
        }

        if reveal.is_last {
            println!("Press Enter to see your results.");
        } else {
            println!("Press Enter for the next question.");
        }
    }

    pub fn result(&self, result: &QuizResult, snapshot: &SessionSnapshot) {
        let palette = self.palette();

        println!();
        println!("{} {}", result.icon, result.message);
        println!(
            "Final score: {}/{} ({}%)",
            result.score, result.total, result.percentage
        );

        let mut summary = Table::new();
        summary.set_header(vec!["Correct", "Incorrect", "Timed out", "Tier", "Best"]);
        let best = match &result.high_score {
            Some(update) if update.is_new_best => {
                Cell::new(format!("{} (new!)", update.best)).fg(palette.accent)
            }
            Some(update) => Cell::new(update.best),
            None => Cell::new("-"),
        };
        summary.add_row(vec![
            Cell::new(result.correct).fg(palette.good),
            Cell::new(result.incorrect).fg(palette.bad),
            Cell::new(result.timed_out),
            Cell::new(result.tier),
            best,
        ]);
        println!("{summary}");

        let mut review = Table::new();
        review.set_header(vec!["#", "Question", "Your answer", "Correct answer"]);
        for (i, answer) in snapshot.answers.iter().enumerate() {
            let chosen = match answer.chosen {
                Some(slot) => {
                    let text = answer.options.get(slot).map(String::as_str).unwrap_or("");
                    let color = if answer.is_correct() {
                        palette.good
                    } else {
                        palette.bad
                    };
                    Cell::new(format!("{}) {}", option_letter(slot), text)).fg(color)
                }
                None => Cell::new("(time ran out)").fg(palette.bad),
            };
            let correct = answer
                .options
                .get(answer.correct_index)
                .map(String::as_str)
                .unwrap_or("");
            review.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&answer.prompt),
                chosen,
                Cell::new(format!("{}) {}", option_letter(answer.correct_index), correct)),
            ]);
        }
        println!("{review}");
    }
}
