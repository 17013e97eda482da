//! Template rendering for shiptrack-out.
//!
//! Uses Handlebars with custom helpers:
//! - eq: Equality comparison for conditionals
//! - plural: Pick singular/plural wording from a count
//! - default: Fallback for empty or missing values

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    Renderable,
};
use serde::Serialize;

use crate::templates::TemplatesFile;

/// Compiled renderer with registered helpers.
///
/// Templates marked `escape: false` compile into a second registry that
/// writes values through untouched, for plain-text output.
pub struct TemplateRenderer<'a> {
    html: Handlebars<'a>,
    plain: Handlebars<'a>,
    templates: TemplatesFile,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer from a templates file. Fails on a template that
    /// does not compile.
    pub fn new(templates: TemplatesFile) -> Result<Self, String> {
        let mut html = registry();
        let mut plain = registry();
        plain.register_escape_fn(no_escape);

        for (name, partial) in &templates.partials {
            for handlebars in [&mut html, &mut plain] {
                handlebars
                    .register_partial(name, &partial.template)
                    .map_err(|e| format!("Partial '{}' failed to compile: {}", name, e))?;
            }
        }
        for (name, template) in &templates.templates {
            let handlebars = if template.escape { &mut html } else { &mut plain };
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Template '{}' failed to compile: {}", name, e))?;
        }

        Ok(TemplateRenderer {
            html,
            plain,
            templates,
        })
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String, String> {
        let template = self
            .templates
            .templates
            .get(template_name)
            .ok_or_else(|| format!("Template not found: {}", template_name))?;
        let handlebars = if template.escape { &self.html } else { &self.plain };
        handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }
}

fn registry<'a>() -> Handlebars<'a> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);

    handlebars.register_helper("eq", Box::new(EqHelper));
    handlebars.register_helper("plural", Box::new(PluralHelper));
    handlebars.register_helper("default", Box::new(DefaultHelper));
    handlebars
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Equality comparison helper for conditionals
struct EqHelper;

impl HelperDef for EqHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let left = h.param(0).map(|v| v.value());
        let right = h.param(1).map(|v| v.value());

        let equal = match (left, right) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        };

        if equal {
            if let Some(template) = h.template() {
                template.render(r, ctx, rc, out)?;
            }
        } else if let Some(template) = h.inverse() {
            template.render(r, ctx, rc, out)?;
        }

        Ok(())
    }
}

/// `{{plural count "update" "updates"}}`
struct PluralHelper;

impl HelperDef for PluralHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let count = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
        let singular = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");
        let plural = h.param(2).and_then(|v| v.value().as_str()).unwrap_or(singular);

        out.write(if count == 1 { singular } else { plural })?;
        Ok(())
    }
}

/// Default value helper
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let default = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

        match value {
            Some(v) if v.as_str().is_some_and(|s| !s.is_empty()) => {
                out.write(v.as_str().unwrap_or_default())?;
            }
            Some(v) if !v.is_null() && !v.is_string() => out.write(&v.to_string())?,
            _ => out.write(default)?,
        }

        Ok(())
    }
}
