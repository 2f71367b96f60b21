/// Loose email shape check: some non-blank text, `@`, some non-blank text,
/// a dot, and at least one more non-blank character. Matches anywhere in the
/// input, as the portal's forms always have.
pub fn is_plausible_email(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();

    chars.iter().enumerate().any(|(at, &c)| {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }

        // Walk the domain part; stop at the first whitespace.
        let domain = &chars[at + 1..];
        let run = domain.iter().take_while(|c| !c.is_whitespace()).count();
        (1..run).any(|dot| domain[dot] == '.' && dot + 1 < run)
    })
}

/// Trimmed-and-empty test shared by every form in the portal.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
