use log::{debug, info};

use crate::config::ModDefinition;
use crate::error::Result;
use crate::registry::Registry;
use crate::sections::check_sections;
use crate::template::{Substitutions, Template};

/// fragments of the document are joined with a blank line
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// values available to the prologue and epilogue templates
#[derive(Debug, Clone, PartialEq)]
pub struct ModMeta {
    pub name: String,
    pub version: String,
}

impl ModMeta {
    pub fn substitutions(&self) -> Substitutions {
        Substitutions::from([
            ("mod_name", self.name.clone()),
            ("mod_version", self.version.clone()),
        ])
    }
}

impl From<&ModDefinition> for ModMeta {
    fn from(definition: &ModDefinition) -> Self {
        ModMeta {
            name: definition.name.clone(),
            version: definition.version.clone(),
        }
    }
}

/// Expands the document template: the prologue once, the preset block once
/// per preset, then the epilogue.
#[derive(Debug, Clone)]
pub struct Renderer {
    prologue: Template,
    preset: Template,
    epilogue: Template,
}

impl Renderer {
    pub fn new(prologue: Template, preset: Template, epilogue: Template) -> Renderer {
        Renderer {
            prologue,
            preset,
            epilogue,
        }
    }

    /// renderer for the templates compiled into the binary
    pub fn embedded() -> Result<Renderer> {
        Ok(Renderer::new(
            Template::load("prologue")?,
            Template::load("preset")?,
            Template::load("epilogue")?,
        ))
    }

    /// Renders the whole document. Either every template expands and the
    /// section markers nest, or an error is returned and no text at all.
    pub fn render(&self, meta: &ModMeta, registry: &Registry) -> Result<String> {
        let meta_values = meta.substitutions();

        let mut fragments = Vec::with_capacity(registry.len() + 2);
        fragments.push(self.prologue.substitute(&meta_values)?);

        for preset in registry {
            debug!("rendering preset '{}'", preset.label);
            fragments.push(self.preset.substitute(&preset.substitutions())?);
        }

        fragments.push(self.epilogue.substitute(&meta_values)?);

        let document = fragments.join(FRAGMENT_SEPARATOR);
        let summary = check_sections(&document)?;
        info!(
            "rendered {} presets, {} sections (max depth {})",
            registry.len(),
            summary.sections,
            summary.max_depth
        );

        Ok(document)
    }
}

/// renders a definition with the embedded templates
pub fn render(definition: &ModDefinition) -> Result<String> {
    let registry = definition.registry()?;
    Renderer::embedded()?.render(&ModMeta::from(definition), &registry)
}
