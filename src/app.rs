//! Application state and the event loop wiring: two screens (setup and
//! browser), keyboard-driven culling actions, and the exit confirmation
//! that gates the bulk delete of viewed images.

use crate::config::{self, Config};
use crate::image_pipeline::LoadedImage;
use crate::message::Message;
use crate::model::actions::{self, KeepOutcome, UndoOutcome};
use crate::model::session::{self, Session};
use crate::notification::Notice;
use crate::views;
use iced::keyboard::key::Named;
use iced::keyboard::{self, Key, Modifiers};
use iced::{window, Element, Size, Subscription, Task, Theme};
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageLevel};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_TITLE: &str = "Snapsort";
const WINDOW_SIZE: Size = Size {
    width: 1100.0,
    height: 800.0,
};

/// How often the notice expiry check runs while a notice is visible.
const NOTICE_TICK: Duration = Duration::from_millis(200);

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    iced::application(App::title, App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: WINDOW_SIZE,
            // Closing the window goes through the exit confirmation.
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .run_with(App::new)
}

pub struct App {
    screen: Screen,
    viewport: Size,
}

pub enum Screen {
    Setup(Setup),
    Browser(Browser),
}

#[derive(Debug, Default)]
pub struct Setup {
    pub source_input: String,
    pub output_input: String,
    pub error: Option<String>,
}

pub struct Browser {
    pub session: Session,
    pub output_dir: PathBuf,
    pub image: Option<LoadedImage>,
    pub load_error: Option<String>,
    pub notice: Notice,
    pub confirm_exit: bool,
}

impl Browser {
    fn new(session: Session, output_dir: PathBuf) -> Self {
        let mut browser = Self {
            session,
            output_dir,
            image: None,
            load_error: None,
            notice: Notice::new(),
            confirm_exit: false,
        };
        browser.reload_image();
        browser
    }

    fn reload_image(&mut self) {
        // Drop the previous frames before decoding the next file, so at
        // most one decoded image is held at a time.
        self.image = None;
        match LoadedImage::load(self.session.current()) {
            Ok(image) => {
                self.image = Some(image);
                self.load_error = None;
            }
            Err(err) => {
                log::error!("{err}");
                self.load_error = Some(err.to_string());
                self.notice
                    .set(format!("Could not load {}", file_name(self.session.current())));
            }
        }
    }
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|err| {
            log::error!("Failed to load settings: {err}");
            Config::default()
        });

        let setup = Setup {
            source_input: path_to_input(config.source_dir.as_deref()),
            output_input: path_to_input(config.output_dir.as_deref()),
            error: None,
        };

        (
            App {
                screen: Screen::Setup(setup),
                viewport: WINDOW_SIZE,
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        match &self.screen {
            Screen::Setup(_) => APP_TITLE.to_string(),
            Screen::Browser(browser) => format!(
                "Image {} of {}",
                browser.session.position(),
                browser.session.len()
            ),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SourceEdited(value) => {
                if let Screen::Setup(setup) = &mut self.screen {
                    setup.source_input = value;
                }
                Task::none()
            }
            Message::OutputEdited(value) => {
                if let Screen::Setup(setup) = &mut self.screen {
                    setup.output_input = value;
                }
                Task::none()
            }
            Message::BrowseSource => Task::perform(
                pick_folder("Select the folder with images to sort"),
                Message::SourcePicked,
            ),
            Message::BrowseOutput => Task::perform(
                pick_folder("Select the folder for kept images"),
                Message::OutputPicked,
            ),
            Message::SourcePicked(path) => {
                if let (Screen::Setup(setup), Some(path)) = (&mut self.screen, path) {
                    setup.source_input = path.display().to_string();
                }
                Task::none()
            }
            Message::OutputPicked(path) => {
                if let (Screen::Setup(setup), Some(path)) = (&mut self.screen, path) {
                    setup.output_input = path.display().to_string();
                }
                Task::none()
            }
            Message::StartBrowsing => self.start_browsing(),
            Message::NoImagesAcknowledged => iced::exit(),

            Message::MovePrevious => {
                if let Screen::Browser(browser) = &mut self.screen {
                    if !browser.confirm_exit && browser.session.move_previous() {
                        browser.reload_image();
                    }
                }
                Task::none()
            }
            Message::MoveNext => {
                if let Screen::Browser(browser) = &mut self.screen {
                    if !browser.confirm_exit && browser.session.move_next() {
                        browser.reload_image();
                    }
                }
                Task::none()
            }
            Message::KeepCurrent => {
                if let Screen::Browser(browser) = &mut self.screen {
                    if !browser.confirm_exit {
                        let name = file_name(browser.session.current());
                        match actions::keep(&browser.output_dir, browser.session.current()) {
                            Ok(KeepOutcome::Kept) => {
                                browser.notice.set(format!("Saved: {name}"));
                            }
                            Ok(KeepOutcome::AlreadyKept) => {
                                browser.notice.set("Already in the output folder.");
                            }
                            Err(err) => {
                                log::error!("{err}");
                                browser.notice.set(format!("Could not save {name}."));
                            }
                        }
                    }
                }
                Task::none()
            }
            Message::UndoKeep => {
                if let Screen::Browser(browser) = &mut self.screen {
                    if !browser.confirm_exit {
                        let name = file_name(browser.session.current());
                        match actions::undo_keep(&browser.output_dir, browser.session.current()) {
                            Ok(UndoOutcome::Removed) => {
                                browser.notice.set(format!("Deleted: {name}"));
                            }
                            Ok(UndoOutcome::NotKept) => {
                                browser.notice.set("Not in the output folder.");
                            }
                            Err(err) => {
                                log::error!("{err}");
                                browser.notice.set(format!("Could not delete {name}."));
                            }
                        }
                    }
                }
                Task::none()
            }
            Message::RequestExit => {
                if let Screen::Browser(browser) = &mut self.screen {
                    // Escape opens the confirmation; inside it, Escape cancels.
                    browser.confirm_exit = !browser.confirm_exit;
                }
                Task::none()
            }
            Message::CancelExit => {
                if let Screen::Browser(browser) = &mut self.screen {
                    browser.confirm_exit = false;
                }
                Task::none()
            }
            Message::QuitWithoutDeleting => iced::exit(),
            Message::DeleteViewedAndQuit => {
                if let Screen::Browser(browser) = &mut self.screen {
                    // Release the displayed image before touching its file.
                    browser.image = None;
                    actions::delete_viewed(browser.session.viewed());
                }
                iced::exit()
            }
            Message::AnimationTick => {
                if let Screen::Browser(browser) = &mut self.screen {
                    if let Some(image) = browser.image.as_mut() {
                        image.advance_frame();
                    }
                }
                Task::none()
            }
            Message::NoticeTick => {
                if let Screen::Browser(browser) = &mut self.screen {
                    browser.notice.tick();
                }
                Task::none()
            }

            Message::WindowResized(size) => {
                self.viewport = size;
                Task::none()
            }
            Message::CloseRequested => match &mut self.screen {
                // Dismissing the setup screen cancels the whole program.
                Screen::Setup(_) => iced::exit(),
                Screen::Browser(browser) => {
                    browser.confirm_exit = true;
                    Task::none()
                }
            },
        }
    }

    fn start_browsing(&mut self) -> Task<Message> {
        let Screen::Setup(setup) = &mut self.screen else {
            return Task::none();
        };

        let source = setup.source_input.trim().to_string();
        let output = setup.output_input.trim().to_string();
        if source.is_empty() || output.is_empty() {
            setup.error = Some("Choose both a source folder and an output folder.".to_string());
            return Task::none();
        }

        let source_dir = PathBuf::from(source);
        let output_dir = PathBuf::from(output);

        let config = Config {
            source_dir: Some(source_dir.clone()),
            output_dir: Some(output_dir.clone()),
        };
        if let Err(err) = config::save(&config) {
            log::error!("Failed to save settings: {err}");
        }

        match session::scan_source(&source_dir) {
            Ok(images) => match Session::new(images) {
                Some(session) => {
                    self.screen = Screen::Browser(Browser::new(session, output_dir));
                    Task::none()
                }
                None => {
                    log::error!("No images found in {}", source_dir.display());
                    Task::perform(
                        async {
                            AsyncMessageDialog::new()
                                .set_level(MessageLevel::Warning)
                                .set_title(APP_TITLE)
                                .set_description("The source folder contains no supported images.")
                                .show()
                                .await;
                        },
                        |_| Message::NoImagesAcknowledged,
                    )
                }
            },
            Err(err) => {
                setup.error = Some(format!("Could not read the source folder: {err}"));
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Setup(setup) => views::setup::view(setup),
            Screen::Browser(browser) => views::browser::view(browser, self.viewport),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            window::close_requests().map(|_| Message::CloseRequested),
            window::resize_events().map(|(_, size)| Message::WindowResized(size)),
        ];

        if let Screen::Browser(browser) = &self.screen {
            subscriptions.push(keyboard::on_key_press(handle_key));

            if browser.notice.is_visible() {
                subscriptions.push(iced::time::every(NOTICE_TICK).map(|_| Message::NoticeTick));
            }

            // Only the currently displayed image drives frame ticks; the
            // subscription disappears with it.
            if let Some(image) = browser.image.as_ref().filter(|image| image.is_animated()) {
                subscriptions
                    .push(iced::time::every(image.frame_delay()).map(|_| Message::AnimationTick));
            }
        }

        Subscription::batch(subscriptions)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn handle_key(key: Key, _modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::ArrowLeft) => Some(Message::MovePrevious),
        Key::Named(Named::ArrowRight) => Some(Message::MoveNext),
        Key::Named(Named::ArrowUp) => Some(Message::KeepCurrent),
        Key::Named(Named::ArrowDown) => Some(Message::UndoKeep),
        Key::Named(Named::Escape) => Some(Message::RequestExit),
        _ => None,
    }
}

async fn pick_folder(title: &'static str) -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title(title)
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}

fn path_to_input(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
