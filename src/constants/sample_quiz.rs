/// Built-in sample payload for offline runs, in the provider wire shape.
/// Twenty questions so every question-count choice is fully served.
pub const SAMPLE_QUIZ_JSON: &str = r#"{
  "questions": [
    {
      "text": "What is the capital of Australia?",
      "correctAnswer": "Canberra",
      "incorrectAnswers": ["Sydney", "Melbourne", "Perth"]
    },
    {
      "text": "Which planet has the most moons?",
      "correctAnswer": "Saturn",
      "incorrectAnswers": ["Jupiter", "Uranus", "Mars"]
    },
    {
      "text": "Who painted the ceiling of the Sistine Chapel?",
      "correctAnswer": "Michelangelo",
      "incorrectAnswers": ["Leonardo da Vinci", "Raphael", "Caravaggio"]
    },
    {
      "text": "What is the chemical symbol for gold?",
      "correctAnswer": "Au",
      "incorrectAnswers": ["Ag", "Gd", "Go"]
    },
    {
      "text": "In which year did the Berlin Wall fall?",
      "correctAnswer": "1989",
      "incorrectAnswers": ["1987", "1991", "1985"]
    },
    {
      "text": "Which ocean is the deepest?",
      "correctAnswer": "Pacific",
      "incorrectAnswers": ["Atlantic", "Indian", "Arctic"]
    },
    {
      "text": "Who wrote 'One Hundred Years of Solitude'?",
      "correctAnswer": "Gabriel Garcia Marquez",
      "incorrectAnswers": ["Jorge Luis Borges", "Mario Vargas Llosa", "Pablo Neruda"]
    },
    {
      "text": "What is the largest internal organ in the human body?",
      "correctAnswer": "Liver",
      "incorrectAnswers": ["Heart", "Lungs", "Kidneys"]
    },
    {
      "text": "Which country invented paper?",
      "correctAnswer": "China",
      "incorrectAnswers": ["Egypt", "Greece", "India"]
    },
    {
      "text": "What is the smallest prime number?",
      "correctAnswer": "2",
      "incorrectAnswers": ["1", "3", "0"]
    },
    {
      "text": "Which gas makes up most of Earth's atmosphere?",
      "correctAnswer": "Nitrogen",
      "incorrectAnswers": ["Oxygen", "Carbon dioxide", "Argon"]
    },
    {
      "text": "Who composed 'The Four Seasons'?",
      "correctAnswer": "Antonio Vivaldi",
      "incorrectAnswers": ["Johann Sebastian Bach", "Wolfgang Amadeus Mozart", "Joseph Haydn"]
    },
    {
      "text": "What is the longest river in the world?",
      "correctAnswer": "Nile",
      "incorrectAnswers": ["Amazon", "Yangtze", "Mississippi"]
    },
    {
      "text": "Which element has the atomic number 1?",
      "correctAnswer": "Hydrogen",
      "incorrectAnswers": ["Helium", "Oxygen", "Carbon"]
    },
    {
      "text": "In which city were the first modern Olympic Games held?",
      "correctAnswer": "Athens",
      "incorrectAnswers": ["Paris", "London", "Rome"]
    },
    {
      "text": "What is the currency of Japan?",
      "correctAnswer": "Yen",
      "incorrectAnswers": ["Won", "Yuan", "Ringgit"]
    },
    {
      "text": "Which scientist proposed the theory of general relativity?",
      "correctAnswer": "Albert Einstein",
      "incorrectAnswers": ["Isaac Newton", "Niels Bohr", "Max Planck"]
    },
    {
      "text": "What is the tallest mountain in Africa?",
      "correctAnswer": "Mount Kilimanjaro",
      "incorrectAnswers": ["Mount Kenya", "Mount Elgon", "Ras Dashen"]
    },
    {
      "text": "Which language has the most native speakers?",
      "correctAnswer": "Mandarin Chinese",
      "incorrectAnswers": ["English", "Spanish", "Hindi"]
    },
    {
      "text": "What does DNA stand for?",
      "correctAnswer": "Deoxyribonucleic acid",
      "incorrectAnswers": ["Deoxyribonuclear acid", "Dinucleic acid", "Deoxyribose nitric acid"]
    }
  ]
}"#;
