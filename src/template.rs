use crate::error::TemplateError;

/// Substitute every `%s` slot of `template` with the next value of `args`.
///
/// `%%` renders a literal `%`. Every slot must be filled and every value must
/// be used.
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len() + args.iter().map(|a| a.as_ref().len()).sum::<usize>());
    let mut args_iter = args.iter();
    let mut used = 0;
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            rendered.push(c);
            continue;
        }

        match chars.next() {
            Some('s') => {
                let arg = args_iter.next().ok_or(TemplateError::NotEnoughArguments {
                    expected: used + 1,
                    provided: args.len(),
                })?;
                rendered.push_str(arg.as_ref());
                used += 1;
            }
            Some('%') => rendered.push('%'),
            Some(other) => return Err(TemplateError::UnsupportedFormat(other)),
            None => return Err(TemplateError::IncompleteFormat),
        }
    }

    if used < args.len() {
        return Err(TemplateError::TooManyArguments { used, provided: args.len() });
    }

    Ok(rendered)
}
