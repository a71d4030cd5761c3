//! The `timequiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create timequiz.toml
    if std::path::Path::new("timequiz.toml").exists() {
        println!("timequiz.toml already exists, skipping.");
    } else {
        std::fs::write("timequiz.toml", SAMPLE_CONFIG)?;
        println!("Created timequiz.toml");
    }

    // Create sample bank
    std::fs::create_dir_all("banks")?;
    let sample_path = std::path::Path::new("banks/sample.toml");
    if sample_path.exists() {
        println!("banks/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_BANK)?;
        println!("Created banks/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to banks/sample.toml");
    println!("  2. Run: timequiz validate --bank banks/sample.toml");
    println!("  3. Run: timequiz play --bank banks/sample.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# timequiz configuration

questions_per_session = 10
question_secs = 15

# Question bank to play; the built-in bank is used when unset.
# bank = "banks/sample.toml"

# Where the high score and theme preference are kept.
# store_path = "${HOME}/.config/timequiz/state.json"
"#;

const SAMPLE_BANK: &str = r#"[bank]
name = "World Capitals"
description = "A sample bank to get started"

[[questions]]
prompt = "What is the capital of Canada?"
options = ["Toronto", "Ottawa", "Vancouver", "Montreal"]
correct = 1

[[questions]]
prompt = "What is the capital of Australia?"
options = ["Sydney", "Melbourne", "Canberra", "Perth"]
correct = 2

[[questions]]
prompt = "What is the capital of Brazil?"
options = ["Rio de Janeiro", "São Paulo", "Salvador", "Brasília"]
correct = 3

[[questions]]
prompt = "What is the capital of Egypt?"
options = ["Cairo", "Alexandria", "Giza", "Luxor"]
correct = 0

[[questions]]
prompt = "What is the capital of Turkey?"
options = ["Istanbul", "Ankara", "Izmir", "Antalya"]
correct = 1

[[questions]]
prompt = "What is the capital of Switzerland?"
options = ["Zurich", "Geneva", "Bern", "Basel"]
correct = 2

[[questions]]
prompt = "What is the capital of Morocco?"
options = ["Casablanca", "Marrakesh", "Fez", "Rabat"]
correct = 3

[[questions]]
prompt = "What is the capital of New Zealand?"
options = ["Wellington", "Auckland", "Christchurch", "Hamilton"]
correct = 0

[[questions]]
prompt = "What is the capital of Vietnam?"
options = ["Ho Chi Minh City", "Hanoi", "Da Nang", "Hue"]
correct = 1

[[questions]]
prompt = "What is the capital of Nigeria?"
options = ["Lagos", "Kano", "Abuja", "Ibadan"]
correct = 2

[[questions]]
prompt = "What is the capital of Kazakhstan?"
options = ["Almaty", "Shymkent", "Karaganda", "Astana"]
correct = 3

[[questions]]
prompt = "What is the capital of Norway?"
options = ["Oslo", "Bergen", "Trondheim", "Stavanger"]
correct = 0
"#;
