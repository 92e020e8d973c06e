use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::{button, column, container, image as image_widget, row, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;

mod catalog;
mod gemini;
mod media;
mod prompt;
mod state;
mod ui;

use catalog::Catalog;
use media::{export, intake, InlineImage};
use state::{Session, Stage};

/// Main application state
struct ProductStager {
    /// The fixed style catalog
    catalog: Catalog,
    /// All mutable per-session state
    session: Session,
    /// Fetched style thumbnails, keyed by template id
    thumbnails: HashMap<String, image_widget::Handle>,
    /// Render handle for the uploaded photo
    uploaded_preview: Option<image_widget::Handle>,
    /// Render handle for the generated image
    generated_preview: Option<image_widget::Handle>,
    /// Gemini API key, read once at startup (may be empty)
    api_key: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Browse Files" button
    PickImage,
    /// User dropped a file onto the window
    FileDropped(PathBuf),
    /// Background photo load completed
    ImageLoaded(Result<InlineImage, String>),
    /// Background thumbnail fetch completed for one template
    ThumbnailFetched(String, Result<Vec<u8>, String>),
    /// User clicked a style card
    SelectTemplate(String),
    /// User typed into a detail field
    EditField(String, String),
    /// User clicked the generate button
    Generate,
    /// The generation call settled
    GenerationFinished(Result<InlineImage, String>),
    /// User clicked the download button
    SaveImage,
    /// Background save completed
    SaveFinished(Result<PathBuf, String>),
}

impl ProductStager {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let catalog = Catalog::builtin();

        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            println!("⚠️  GEMINI_API_KEY is not set; generation will fail until it is.");
        }

        println!("🛋️  Product Stager initialized with {} styles", catalog.len());

        // Fetch the style thumbnails in the background; cards render
        // without a picture until theirs arrives.
        let thumbnail_tasks: Vec<Task<Message>> = catalog
            .templates()
            .iter()
            .map(|template| {
                let id = template.id.clone();
                Task::perform(
                    intake::fetch_thumbnail(template.thumbnail.clone()),
                    move |result| Message::ThumbnailFetched(id.clone(), result),
                )
            })
            .collect();

        let status = format!("Ready. {} styles in the catalog.", catalog.len());

        (
            ProductStager {
                catalog,
                session: Session::new(),
                thumbnails: HashMap::new(),
                uploaded_preview: None,
                generated_preview: None,
                api_key,
                status,
            },
            Task::batch(thumbnail_tasks),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select Product Photo")
                    .add_filter("Images", &intake::SUPPORTED_EXTENSIONS)
                    .pick_file();

                match picked {
                    Some(path) => self.load_photo(path),
                    None => Task::none(),
                }
            }

            Message::FileDropped(path) => {
                if intake::has_supported_extension(&path) {
                    self.load_photo(path)
                } else {
                    self.status = format!(
                        "⚠️ {} is not a supported image (PNG, JPEG, WEBP).",
                        path.display()
                    );
                    Task::none()
                }
            }

            Message::ImageLoaded(Ok(image)) => {
                self.uploaded_preview =
                    Some(image_widget::Handle::from_bytes(image.data.clone()));
                self.status = format!("✅ Product photo loaded ({} KB).", image.size_kb());
                self.session.set_uploaded_image(image);
                Task::none()
            }

            Message::ImageLoaded(Err(error)) => {
                // Intake failures stay on the status line; they never
                // touch the session or a previously loaded photo.
                eprintln!("⚠️  {}", error);
                self.status = format!("⚠️ {}", error);
                Task::none()
            }

            Message::ThumbnailFetched(id, Ok(bytes)) => {
                self.thumbnails
                    .insert(id, image_widget::Handle::from_bytes(bytes));
                Task::none()
            }

            Message::ThumbnailFetched(id, Err(error)) => {
                // Thumbnails are decorative, the card shows without one
                eprintln!("⚠️  Thumbnail for '{}' unavailable: {}", id, error);
                Task::none()
            }

            Message::SelectTemplate(id) => {
                if let Some(template) = self.catalog.get(&id) {
                    self.status = format!("Style '{}' selected.", template.name);
                }
                self.session.select_template(&id);
                Task::none()
            }

            Message::EditField(field_id, value) => {
                self.session.set_input(&field_id, value);
                Task::none()
            }

            Message::Generate => {
                match self.session.begin_generate(&self.catalog) {
                    Some((image, resolved_prompt)) => {
                        self.generated_preview = None;
                        self.status = "Generating your staged image...".to_string();

                        let api_key = self.api_key.clone();
                        Task::perform(
                            async move {
                                gemini::generate(api_key, image, resolved_prompt)
                                    .await
                                    .map_err(|e| e.to_string())
                            },
                            Message::GenerationFinished,
                        )
                    }
                    // Preconditions failed; the session already holds
                    // the user-visible error.
                    None => Task::none(),
                }
            }

            Message::GenerationFinished(result) => {
                match &result {
                    Ok(image) => {
                        self.generated_preview =
                            Some(image_widget::Handle::from_bytes(image.data.clone()));
                        self.status = "✅ Image generated.".to_string();
                    }
                    Err(error) => {
                        self.generated_preview = None;
                        eprintln!("⚠️  Generation failed: {}", error);
                        self.status = "⚠️ Generation failed.".to_string();
                    }
                }
                self.session.finish_generate(result);
                Task::none()
            }

            Message::SaveImage => {
                let Some(image) = self.session.generated_image().cloned() else {
                    return Task::none();
                };

                let picked = FileDialog::new()
                    .set_title("Save Generated Image")
                    .set_directory(export::default_directory())
                    .set_file_name(export::default_filename(&image))
                    .save_file();

                match picked {
                    Some(path) => Task::perform(
                        export::write_image(path, image),
                        Message::SaveFinished,
                    ),
                    None => Task::none(),
                }
            }

            Message::SaveFinished(Ok(path)) => {
                self.status = format!("✅ Saved to {}.", path.display());
                Task::none()
            }

            Message::SaveFinished(Err(error)) => {
                eprintln!("⚠️  {}", error);
                self.status = format!("⚠️ {}", error);
                Task::none()
            }
        }
    }

    /// Kick off an async photo load
    fn load_photo(&mut self, path: PathBuf) -> Task<Message> {
        self.status = format!("Loading {}...", path.display());
        Task::perform(intake::load_image_file(path), Message::ImageLoaded)
    }

    /// One-line hint for the current lifecycle stage
    fn stage_hint(&self) -> &'static str {
        match self.session.stage(&self.catalog) {
            Stage::Empty => "Upload a product photo and pick a style to get started.",
            Stage::Incomplete => "Generate unlocks once a photo, a style, and all details are in.",
            Stage::Ready => "Ready to generate.",
            Stage::Generating => "Working...",
            Stage::Succeeded => "Done. Download your image, or tweak and regenerate.",
            Stage::Failed => "Generation failed. Adjust and try again.",
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = column![
            text("AI Product Stager").size(40),
            text("Create professional product photos in seconds.").size(16),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        // Left column: upload, style grid, detail fields, generate
        let mut controls = column![
            ui::uploader::uploader(self.uploaded_preview.as_ref()),
            ui::templates::style_grid(&self.catalog, &self.session, &self.thumbnails),
        ]
        .spacing(24);

        if let Some(template) = self
            .session
            .selected_template_id()
            .and_then(|id| self.catalog.get(id))
        {
            if template.has_fields() {
                controls = controls.push(ui::templates::detail_fields(template, &self.session));
            }
        }

        let generate_label = if self.session.is_loading() {
            "Generating..."
        } else {
            "✨ Generate Image"
        };
        let generate = button(text(generate_label).size(18))
            .on_press_maybe(
                self.session
                    .can_generate(&self.catalog)
                    .then_some(Message::Generate),
            )
            .padding(12)
            .width(Length::Fill);
        controls = controls.push(generate);

        let left = container(scrollable(controls.padding(4)))
            .width(Length::FillPortion(1))
            .padding(16);

        // Right column: the output pane
        let right = container(ui::output::output_panel(
            &self.session,
            self.generated_preview.as_ref(),
        ))
        .width(Length::FillPortion(1))
        .padding(16);

        let body = row![left, right].spacing(16).height(Length::Fill);

        let status_bar = row![
            text(&self.status).size(14).width(Length::Fill),
            text(self.stage_hint()).size(14),
        ]
        .spacing(16);

        let content = column![header, body, status_bar].spacing(16).padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Listen for files dropped onto the window
    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(iced::window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Product Stager",
        ProductStager::update,
        ProductStager::view,
    )
    .subscription(ProductStager::subscription)
    .theme(ProductStager::theme)
    .centered()
    .run_with(ProductStager::new)
}
