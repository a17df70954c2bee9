use crate::libarena::question::{Difficulty, NewQuestion};
use crate::libarena::service::QuestionService;
use log::{error, info};

pub struct SeedQuestion {
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct_answer: &'static str,
    pub difficulty: Difficulty,
}

impl SeedQuestion {
    pub fn to_new_question(&self) -> NewQuestion {
        NewQuestion {
            text: self.text.to_string(),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            correct_answer: self.correct_answer.to_string(),
            difficulty: self.difficulty,
            image_url: None,
        }
    }
}

pub static SEED_QUESTIONS: [SeedQuestion; 20] = [
    SeedQuestion {
        text: "Which planet is closest to the Sun?",
        options: ["Venus", "Mercury", "Mars", "Earth"],
        correct_answer: "Mercury",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "What is the capital of France?",
        options: ["Berlin", "Madrid", "Paris", "Rome"],
        correct_answer: "Paris",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "Who wrote 'Romeo and Juliet'?",
        options: ["Shakespeare", "Dante", "Goethe", "Cervantes"],
        correct_answer: "Shakespeare",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "What is the largest ocean on Earth?",
        options: ["Atlantic", "Indian", "Arctic", "Pacific"],
        correct_answer: "Pacific",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "Which element has the chemical symbol 'O'?",
        options: ["Oxygen", "Gold", "Iron", "Silver"],
        correct_answer: "Oxygen",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "What is the square root of 64?",
        options: ["6", "8", "7", "9"],
        correct_answer: "8",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "Who painted the Mona Lisa?",
        options: ["Michelangelo", "Leonardo da Vinci", "Raphael", "Van Gogh"],
        correct_answer: "Leonardo da Vinci",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "Which country is known as the Land of the Rising Sun?",
        options: ["China", "Japan", "Thailand", "South Korea"],
        correct_answer: "Japan",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "What is the hardest natural substance?",
        options: ["Gold", "Diamond", "Iron", "Quartz"],
        correct_answer: "Diamond",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "Which gas do plants absorb from the atmosphere?",
        options: ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"],
        correct_answer: "Carbon Dioxide",
        difficulty: Difficulty::Easy,
    },
    SeedQuestion {
        text: "What is the capital of Australia?",
        options: ["Sydney", "Melbourne", "Canberra", "Perth"],
        correct_answer: "Canberra",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "Who discovered penicillin?",
        options: ["Marie Curie", "Alexander Fleming", "Louis Pasteur", "Isaac Newton"],
        correct_answer: "Alexander Fleming",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "What is the smallest prime number?",
        options: ["1", "2", "3", "5"],
        correct_answer: "2",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "Which planet has the most moons?",
        options: ["Earth", "Mars", "Jupiter", "Saturn"],
        correct_answer: "Saturn",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "What is the chemical formula for table salt?",
        options: ["NaCl", "KCl", "CaCO3", "H2O"],
        correct_answer: "NaCl",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "Who is known as the father of computers?",
        options: ["Alan Turing", "Charles Babbage", "Bill Gates", "Steve Jobs"],
        correct_answer: "Charles Babbage",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "Which year did World War II end?",
        options: ["1942", "1945", "1948", "1950"],
        correct_answer: "1945",
        difficulty: Difficulty::Medium,
    },
    SeedQuestion {
        text: "What is the largest desert in the world?",
        options: ["Sahara", "Gobi", "Antarctic", "Arabian"],
        correct_answer: "Antarctic",
        difficulty: Difficulty::Hard,
    },
    SeedQuestion {
        text: "Who developed the theory of relativity?",
        options: ["Newton", "Einstein", "Galileo", "Tesla"],
        correct_answer: "Einstein",
        difficulty: Difficulty::Hard,
    },
    SeedQuestion {
        text: "Which language has the most native speakers?",
        options: ["English", "Mandarin", "Spanish", "Hindi"],
        correct_answer: "Mandarin",
        difficulty: Difficulty::Hard,
    },
];

/// Inserts every seed question, logging and skipping the ones that fail.
/// Returns how many were stored.
pub fn seed_questions(service: &QuestionService) -> usize {
    let mut inserted = 0;
    for question in SEED_QUESTIONS.iter() {
        match service.create(question.to_new_question()) {
            Ok(stored) => {
                info!("[Seed] Inserted {}: {}", stored.id, question.text);
                inserted += 1;
            }
            Err(err) => error!("[Seed] Error inserting question: {}: {}", question.text, err),
        }
    }
    inserted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libarena::db;

    #[test]
    fn seed_questions_are_well_formed() {
        for question in SEED_QUESTIONS.iter() {
            assert!(question.options.contains(&question.correct_answer), "{}", question.text);
            assert_eq!(question.to_new_question().validate(), Ok(()));
        }
    }

    #[test]
    fn seeding_fills_the_bank() {
        let service = QuestionService::new(db::open_in_memory().unwrap());
        assert_eq!(seed_questions(&service), SEED_QUESTIONS.len());
        assert_eq!(service.find_all().unwrap().len(), SEED_QUESTIONS.len());
    }
}
