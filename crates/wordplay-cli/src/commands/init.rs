//! The `wordplay init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("wordplay.toml").exists() {
        println!("wordplay.toml already exists, skipping.");
    } else {
        std::fs::write("wordplay.toml", SAMPLE_CONFIG)?;
        println!("Created wordplay.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: wordplay book create Basics");
    println!("  2. Run: wordplay book select Basics");
    println!("  3. Run: wordplay word add cat 고양이");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wordplay configuration

# Where word books are stored. WORDPLAY_DATA_FILE and --data override this.
data_file = "wordbooks.json"

# Exposed words below this accuracy (percent) are weak.
weak_threshold = 50.0

# Words at or above this accuracy (percent) are strong.
strong_threshold = 80.0

# Maximum number of pairs in a matching game.
match_pairs = 8

# meaning-to-word or word-to-meaning
default_direction = "meaning-to-word"
"#;
