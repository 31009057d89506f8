use wordgen_core::{Casing, GenerationInput, Generator, SeededRandom};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The word list is owned by the caller and only borrowed during generation
    let words = ["correct", "horse", "battery", "staple", "straße", "istanbul"];

    // Default configuration: one word, no casing, space separator, English locale
    let mut input = GenerationInput::default();

    // Number of words to draw (with replacement)
    input.count = 4;

    // Casing can be 'None', 'Upper', 'Title' or 'Lower'
    input.casing = Casing::Title;

    // String placed between words (never after the last one)
    input.separator = "-".to_owned();

    let generator = Generator::new(input);
    for i in 0..5 {
        println!("Passphrase {}: {}", i + 1, generator.generate(&words)?);
    }

    // Casing follows the rules of the configured locale
    let turkish = GenerationInput::default()
        .with_count(3)
        .with_casing(Casing::Upper)
        .with_locale("tr")?;
    println!("Turkish upper: {}", Generator::new(turkish).generate(&words)?);

    // Casing names can come from user input
    let casing: Casing = "lower".parse()?;
    println!("Lower: {}", Generator::new(GenerationInput::default().with_casing(casing)).generate(&["SHOUT"])?);

    // Invalid settings are reported, not silently fixed
    match GenerationInput::default().with_locale("not a locale!") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected locale: {e}"),
    }
    let empty: [&str; 0] = [];
    match Generator::default().generate(&empty) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected word list: {e}"),
    }

    // A count of zero is a success and yields the empty string
    let nothing = Generator::new(GenerationInput::default().with_count(0)).generate(&words)?;
    println!("Zero words: {nothing:?}");

    // Fixtures can be reproduced with a seeded source
    let fixture = Generator::new(GenerationInput::default().with_count(3).with_separator("_"));
    let a = fixture.generate_with(&words, &mut SeededRandom::new(42))?;
    let b = fixture.generate_with(&words, &mut SeededRandom::new(42))?;
    println!("Seeded fixture: {a} (reproduced: {})", a == b);

    Ok(())
}
