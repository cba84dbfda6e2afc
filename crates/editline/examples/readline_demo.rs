//! Minimal line-editing loop: prompt, read, record history.
//!
//! Run with: cargo run --example readline_demo
//! Requires libedit to be installed (e.g. libedit2 on Debian/Ubuntu).

use editline::{Editor, History};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::new()?;
    history.set_size(100);

    let mut editor = Editor::new("readline_demo")?;
    editor.set_hist_default_fn(&history)?;
    editor.set_prompt_esc(|| "demo> ".to_string(), 1);

    while let Some((line, count)) = editor.read_line() {
        let trimmed = line.trim_end_matches('\n');
        if trimmed == "exit" {
            break;
        }
        if !trimmed.is_empty() {
            history.enter(trimmed)?;
        }
        println!("read {count} chars: {trimmed}");
    }

    Ok(())
}
