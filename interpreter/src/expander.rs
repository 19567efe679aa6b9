use dicer::Template;
use dicer::parser::{ParseError, Parser};
use dicer::template::TemplatePart;
use dicer::template::normalize::{has_real_reference, normalize};
use tracing::debug;

use crate::error::ExpandError;
use crate::evaluator::evaluate;

/// Expand `template` against `inputs`.
///
/// Inputs are checked first, then the template is normalized, scanned and
/// evaluated. Either the whole expansion succeeds or nothing is returned.
pub fn expand<S: AsRef<str>>(template: &str, inputs: &[S]) -> Result<String, ExpandError> {
    if inputs.is_empty() {
        return Err(ExpandError::NoInputs);
    }
    debug!(template = %template, inputs = inputs.len(), "expanding template");

    let prepared = prepare(template, 0)?;
    render(&prepared, inputs)
}

/// Normalize and parse a template so it can be rendered against many input lists.
pub fn prepare(template: &str, source_id: usize) -> Result<Template, ParseError> {
    let normalized = normalize(template, has_real_reference(template));
    Parser::new(&normalized, source_id).parse()
}

/// Render a prepared template.
pub fn render<S: AsRef<str>>(template: &Template, inputs: &[S]) -> Result<String, ExpandError> {
    if inputs.is_empty() {
        return Err(ExpandError::NoInputs);
    }

    let mut result = String::new();
    for part in &template.parts {
        match part {
            TemplatePart::Literal(s) => result.push_str(s),
            placeholder => result.push_str(&evaluate(placeholder, inputs)?),
        }
    }
    Ok(result)
}
