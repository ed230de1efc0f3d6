//! Shell line tokenizer
//!
//! Splits on whitespace. Text inside double quotes stays one token, so
//! `move 5 -s "Default Account"` yields a single account name. An unclosed
//! quote runs to the end of the line.

/// Split a shell line into arguments
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    // Distinguishes `""` (an empty argument) from no argument at all
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}
