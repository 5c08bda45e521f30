use crate::error::Error;
use crate::namespace::TemplateNamespace;
use minijinja::Environment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Trailing extension of a resource path (final dot not preceded by a
/// slash or another dot in the last segment).
static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.([^/.]+)$").expect("invalid extension regex"));

/// How a template source turns into output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Interpolate attributes into static markup and return the result.
    Markup,
    /// Interpolate attributes into page-mutation statements and wrap them
    /// in error-handling boilerplate; served as `text/javascript`.
    Script,
}

impl RenderStrategy {
    /// Strategy for a resource extension, if the extension is recognized.
    #[must_use]
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext {
            "html" => Some(RenderStrategy::Markup),
            "pjs" => Some(RenderStrategy::Script),
            _ => None,
        }
    }

    /// Content type the response must carry for this strategy, if any.
    #[must_use]
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            RenderStrategy::Markup => None,
            RenderStrategy::Script => Some("text/javascript"),
        }
    }

    fn render(self, source: &str, attributes: &Map<String, Value>) -> Result<String, Error> {
        let env = Environment::new();
        let body = env.render_str(source, attributes)?;
        match self {
            RenderStrategy::Markup => Ok(body),
            RenderStrategy::Script => Ok(wrap_script(&body)),
        }
    }
}

fn wrap_script(statements: &str) -> String {
    format!(
        "try {{\n{}\n}} catch (e) {{ alert('Script error:\\n\\n' + e.toString()); }}",
        statements.trim_end()
    )
}

/// A resolved template: source, strategy, attribute map and an optional
/// layout template.
#[derive(Clone)]
pub struct Template<'f> {
    factory: &'f TemplateFactory,
    name: String,
    path: String,
    strategy: RenderStrategy,
    source: String,
    attributes: Map<String, Value>,
    layout: Option<Box<Template<'f>>>,
}

impl<'f> Template<'f> {
    /// Logical name this template was opened as.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved resource path, extension included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The rendering strategy selected by the resolved extension.
    #[must_use]
    pub fn strategy(&self) -> RenderStrategy {
        self.strategy
    }

    /// The value of one attribute, if set.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All attributes currently set.
    #[must_use]
    pub fn get_attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Set one attribute.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    /// Merge a set of attributes; incoming values replace existing ones.
    pub fn set_attributes(&mut self, attributes: &Map<String, Value>) {
        for (key, value) in attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Remove one attribute.
    pub fn clear_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Remove all attributes.
    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// Set the layout template by logical name.
    pub fn set_layout(&mut self, layout: &str) -> Result<(), Error> {
        self.layout = Some(Box::new(self.factory.open(layout)?));
        Ok(())
    }

    /// Render this template; when a layout is set, render the layout with
    /// this template's attributes plus `content_for_layout` bound to the
    /// inner output.
    pub fn render(&self) -> Result<String, Error> {
        let inner = self.strategy.render(&self.source, &self.attributes)?;
        match &self.layout {
            Some(layout) => {
                let mut outer = (**layout).clone();
                let mut attributes = self.attributes.clone();
                attributes.insert("content_for_layout".to_string(), Value::String(inner));
                outer.set_attributes(&attributes);
                outer.render()
            }
            None => Ok(inner),
        }
    }

    /// Merge attributes, optionally set a layout, and render.
    pub fn render_with(
        &mut self,
        attributes: &Map<String, Value>,
        layout: Option<&str>,
    ) -> Result<String, Error> {
        if let Some(layout) = layout {
            self.set_layout(layout)?;
        }
        self.set_attributes(attributes);
        self.render()
    }

    /// Render another template with this template's attributes as the
    /// base, the given ones on top.
    pub fn render_partial(
        &self,
        name: &str,
        attributes: &Map<String, Value>,
    ) -> Result<String, Error> {
        let mut merged = self.attributes.clone();
        for (key, value) in attributes {
            merged.insert(key.clone(), value.clone());
        }
        self.factory.render(name, &merged, None)
    }

    /// Render `name` once per element of `collection`, binding each
    /// element under the last path segment of `name`, and join the
    /// results with the rendered spacer template (empty string if none).
    pub fn render_partial_collection(
        &self,
        name: &str,
        collection: &[Value],
        spacer: Option<&str>,
        attributes: &Map<String, Value>,
    ) -> Result<String, Error> {
        let mut template = self.factory.open(name)?;
        template.set_attributes(&self.attributes);
        template.set_attributes(attributes);

        let iterator_name = name.rsplit('/').next().unwrap_or(name);

        let mut collected = Vec::with_capacity(collection.len());
        for element in collection {
            let mut each = template.clone();
            each.set_attribute(iterator_name, element.clone());
            collected.push(each.render()?);
        }

        let spacer = match spacer {
            Some(spacer) => self.render_partial(spacer, attributes)?,
            None => String::new(),
        };

        Ok(collected.join(&spacer))
    }
}

/// Opens logical template names against a shared, read-only namespace and
/// renders them.
pub struct TemplateFactory {
    namespace: Arc<dyn TemplateNamespace>,
}

impl TemplateFactory {
    /// Create a factory over a template namespace.
    pub fn new(namespace: Arc<dyn TemplateNamespace>) -> Self {
        Self { namespace }
    }

    /// Resolve a logical name to a concrete template.
    ///
    /// A name carrying a recognized extension is used directly as the
    /// resource path; otherwise the first candidate in the namespace's
    /// enumeration order wins. Fails with [`Error::TemplateNotFound`]
    /// when nothing matches.
    pub fn open(&self, name: &str) -> Result<Template<'_>, Error> {
        let (path, ext) = match EXTENSION_RE.captures(name) {
            Some(caps) => (name.to_string(), caps[1].to_string()),
            None => {
                let candidates = self.namespace.find_candidates(name);
                debug!(
                    template = %name,
                    candidate_count = candidates.len(),
                    "Template candidate lookup"
                );
                let path = candidates
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::TemplateNotFound(name.to_string()))?;
                let ext = EXTENSION_RE
                    .captures(&path)
                    .map(|caps| caps[1].to_string())
                    .unwrap_or_default();
                (path, ext)
            }
        };

        let strategy = RenderStrategy::for_extension(&ext)
            .ok_or_else(|| Error::Internal(format!("No rendering strategy for \"{path}\"")))?;
        let source = self
            .namespace
            .read(&path)
            .map_err(|_| Error::TemplateNotFound(name.to_string()))?;

        Ok(Template {
            factory: self,
            name: name.to_string(),
            path,
            strategy,
            source,
            attributes: Map::new(),
            layout: None,
        })
    }

    /// Open, populate and render a template in one call.
    pub fn render(
        &self,
        name: &str,
        attributes: &Map<String, Value>,
        layout: Option<&str>,
    ) -> Result<String, Error> {
        let mut template = self.open(name)?;
        template.render_with(attributes, layout)
    }
}
