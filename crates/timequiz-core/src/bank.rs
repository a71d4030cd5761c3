//! Built-in general-knowledge question bank.

use crate::error::QuizError;
use crate::model::{QuestionBank, QuestionRecord, OPTION_COUNT};

/// Seed data: prompt, options, slot of the correct option.
const SEED: &[(&str, [&str; OPTION_COUNT], usize)] = &[
    ("What is the capital of Japan?", ["Seoul", "Tokyo", "Beijing", "Bangkok"], 1),
    ("Which planet is known as the Red Planet?", ["Venus", "Jupiter", "Mars", "Saturn"], 2),
    (
        "What is the largest ocean on Earth?",
        ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
        3,
    ),
    (
        "Who painted the Mona Lisa?",
        ["Vincent van Gogh", "Leonardo da Vinci", "Pablo Picasso", "Michelangelo"],
        1,
    ),
    ("What is the chemical symbol for gold?", ["Go", "Gd", "Au", "Ag"], 2),
    (
        "Which country is home to the kangaroo?",
        ["New Zealand", "South Africa", "Australia", "Brazil"],
        2,
    ),
    (
        "What is the hardest natural substance on Earth?",
        ["Titanium", "Diamond", "Platinum", "Tungsten"],
        1,
    ),
    ("How many continents are there on Earth?", ["5", "6", "7", "8"], 2),
    ("What year did World War II end?", ["1943", "1944", "1945", "1946"], 2),
    (
        "Which element has the chemical symbol 'O'?",
        ["Osmium", "Oxygen", "Oganesson", "Olivine"],
        1,
    ),
    (
        "What is the largest mammal in the world?",
        ["African Elephant", "Blue Whale", "Giraffe", "Hippopotamus"],
        1,
    ),
    ("Which country invented pizza?", ["France", "Spain", "Italy", "Greece"], 2),
    (
        "What is the speed of light in km/s (approximately)?",
        ["100,000 km/s", "200,000 km/s", "300,000 km/s", "400,000 km/s"],
        2,
    ),
    (
        "Who wrote 'Romeo and Juliet'?",
        ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
        1,
    ),
    (
        "What is the smallest country in the world?",
        ["Monaco", "Vatican City", "San Marino", "Liechtenstein"],
        1,
    ),
    (
        "Which gas do plants absorb from the atmosphere?",
        ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"],
        2,
    ),
    (
        "What is the currency of the United Kingdom?",
        ["Euro", "Dollar", "Pound Sterling", "Franc"],
        2,
    ),
    ("How many bones are in the adult human body?", ["186", "206", "226", "246"], 1),
    ("Which planet has the most moons?", ["Jupiter", "Saturn", "Uranus", "Neptune"], 1),
    ("What is the main ingredient in guacamole?", ["Tomato", "Avocado", "Onion", "Lime"], 1),
    (
        "What is the tallest mountain in the world?",
        ["K2", "Kangchenjunga", "Mount Everest", "Lhotse"],
        2,
    ),
    (
        "Which is the longest river in South America?",
        ["Orinoco", "Amazon", "Paraná", "Magdalena"],
        1,
    ),
    (
        "Who developed the theory of general relativity?",
        ["Isaac Newton", "Niels Bohr", "Albert Einstein", "Max Planck"],
        2,
    ),
    ("What is the smallest prime number?", ["0", "1", "2", "3"], 2),
    (
        "Which instrument has keys, pedals, and strings?",
        ["Violin", "Guitar", "Piano", "Flute"],
        2,
    ),
    (
        "Which language is primarily spoken in Brazil?",
        ["Spanish", "Portuguese", "French", "English"],
        1,
    ),
    ("What is H2O commonly known as?", ["Hydrogen", "Helium", "Water", "Salt"], 2),
    (
        "Who discovered penicillin?",
        ["Louis Pasteur", "Alexander Fleming", "Marie Curie", "Isaac Newton"],
        1,
    ),
    ("Which planet is closest to the Sun?", ["Venus", "Earth", "Mercury", "Mars"], 2),
    (
        "What is the freezing point of water in Celsius?",
        ["0°C", "32°C", "100°C", "-1°C"],
        0,
    ),
];

/// Records of the built-in bank, in authored order.
pub fn builtin_records() -> Vec<QuestionRecord> {
    SEED.iter()
        .map(|(prompt, options, correct)| QuestionRecord::new(prompt, *options, *correct))
        .collect()
}

/// The built-in bank, validated like any loaded bank.
pub fn builtin() -> Result<QuestionBank, QuizError> {
    QuestionBank::new(builtin_records())
}
