// Tolerant CSV tokenizer.
//
// POS exports in the wild are RFC4180-ish at best: quoted fields with
// embedded commas and newlines, doubled quotes as escapes, mixed
// CRLF/LF line endings, and sometimes an unterminated quote at the end
// of the file. This scanner accepts all of it and always returns rows;
// malformed input degrades, it never errors.

/// Split raw CSV text into rows of string cells.
///
/// Single left-to-right scan with an "inside quoted field" flag. A `"`
/// outside quote mode opens it, `""` inside quote mode emits a literal
/// quote, a lone `"` inside quote mode closes it. `,` outside quote
/// mode ends the field; `\r\n`, `\r` and `\n` outside quote mode end
/// the row. A leading UTF-8 BOM is stripped before scanning.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current_field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    current_row.push(std::mem::take(&mut current_field));
                }
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    current_row.push(std::mem::take(&mut current_field));
                    rows.push(std::mem::take(&mut current_row));
                }
                '\n' => {
                    current_row.push(std::mem::take(&mut current_field));
                    rows.push(std::mem::take(&mut current_row));
                }
                _ => current_field.push(ch),
            }
        }
    }

    // Flush a trailing row that has no final line terminator.
    if !current_field.is_empty() || !current_row.is_empty() {
        current_row.push(current_field);
        rows.push(current_row);
    }

    rows
}
