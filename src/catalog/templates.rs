/// Staging style templates
///
/// Each template describes one visual style: a display name, a thumbnail
/// reference, and a prompt for the image model. A few templates carry
/// user-fillable fields whose values are substituted into the prompt
/// before generation (see the prompt module).

/// A user-fillable detail for a template
///
/// The field id must match a `{field_id}` token in the owning
/// template's prompt text.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateField {
    /// Token name used in the prompt text (e.g., "brand_name")
    pub id: String,
    /// Label shown next to the input (e.g., "Brand Name")
    pub label: String,
    /// Hint text shown inside the empty input
    pub placeholder: String,
}

/// One staging style in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Stable id, unique across the catalog
    pub id: String,
    /// Display name shown on the style card
    pub name: String,
    /// Thumbnail URL shown on the style card
    pub thumbnail: String,
    /// Prompt text, optionally containing `{field_id}` tokens
    pub prompt: String,
    /// User-fillable details, in display order (empty for most styles)
    pub fields: Vec<TemplateField>,
}

impl Template {
    fn new(id: &str, name: &str, thumbnail: &str, prompt: &str) -> Self {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: thumbnail.to_string(),
            prompt: prompt.to_string(),
            fields: Vec::new(),
        }
    }

    fn with_fields(mut self, fields: Vec<TemplateField>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether this template requires user-entered details
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

impl TemplateField {
    fn new(id: &str, label: &str, placeholder: &str) -> Self {
        TemplateField {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

/// The ordered, immutable set of staging styles
///
/// Built once at startup; lookups go through `get`.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Template>,
}

impl Catalog {
    /// Wrap an ordered template list (ids must be unique)
    pub fn new(templates: Vec<Template>) -> Self {
        Catalog { templates }
    }

    /// The built-in style catalog
    pub fn builtin() -> Self {
        Catalog::new(vec![
            Template::new(
                "minimalist-stone",
                "Minimalist Stone",
                "https://picsum.photos/id/22/200/200",
                "Place the product on a flat, minimalist stone slab. The background \
                 should be a soft, out-of-focus neutral color. The lighting should be \
                 bright and clean, casting a soft shadow.",
            ),
            Template::new(
                "lush-jungle",
                "Lush Jungle",
                "https://picsum.photos/id/1015/200/200",
                "Position the product in the foreground of a vibrant, lush jungle \
                 scene. Add large green leaves and dappled sunlight filtering through \
                 the canopy. The product should remain the clear focus.",
            ),
            Template::new(
                "urban-rooftop",
                "Urban Rooftop",
                "https://picsum.photos/id/1041/200/200",
                "Set the product on a modern urban rooftop at dusk. The background \
                 should show a blurred cityscape with warm city lights. The product \
                 should be lit professionally.",
            ),
            Template::new(
                "warm-wood",
                "Warm Wooden Cafe",
                "https://picsum.photos/id/225/200/200",
                "Place the product on a warm, polished wooden table inside a cozy, \
                 rustic cafe. The background should be softly blurred, showing hints \
                 of cafe ambiance like a coffee cup or plant.",
            ),
            Template::new(
                "beach-sunset",
                "Beach Sunset",
                "https://picsum.photos/id/433/200/200",
                "Feature the product on clean, white sand at a beach during a golden \
                 hour sunset. The ocean in the background should be calm with soft \
                 waves. The lighting should be warm and dramatic.",
            ),
            Template::new(
                "cyberpunk-glow",
                "Cyberpunk Glow",
                "https://picsum.photos/id/536/200/200",
                "Integrate the product into a futuristic cyberpunk setting. The scene \
                 should be dark, with vibrant neon lights and reflections on wet \
                 ground. The product should be highlighted with a neon glow.",
            ),
            Template::new(
                "luxury-marble",
                "Luxury Marble",
                "https://picsum.photos/id/24/200/200",
                "Place the product on a luxurious white and gray marble surface. The \
                 background should be simple and elegant. Use sophisticated, soft \
                 lighting to emphasize the product's quality.",
            ),
            Template::new(
                "cosmic-nebula",
                "Cosmic Nebula",
                "https://picsum.photos/id/19/200/200",
                "Make the product float gracefully in front of a stunning, colorful \
                 cosmic nebula. Add subtle stars and a gentle glow around the product \
                 to integrate it into the space scene.",
            ),
            Template::new(
                "luxury-magazine",
                "Luxury Magazine",
                "https://picsum.photos/id/1080/200/200",
                "Authentic shot of a top luxury brand, {brand_name} {product_type}, \
                 professional photoshoot for {magazine_name}, a sharp \
                 {background_color} background, with exquisite details. Featuring \
                 ultra luxury fashion. Designer appeal with a luxury aesthetic. \
                 {brand_name} style designs, stylish and high-end atmosphere.",
            )
            .with_fields(vec![
                TemplateField::new("brand_name", "Brand Name", "e.g., Gucci, Chanel"),
                TemplateField::new("product_type", "Product Type", "e.g., handbag, shoes"),
                TemplateField::new("magazine_name", "Magazine Name", "e.g., Vogue, Elle"),
                TemplateField::new(
                    "background_color",
                    "Background Color",
                    "e.g., sharp white, matte black",
                ),
            ]),
        ])
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates, in catalog order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of styles in the catalog
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
