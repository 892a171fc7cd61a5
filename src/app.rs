//! App struct: lifecycle, event loop, screen wiring.
//!
//! [`App`] ties together the form screen, event dispatcher, key bindings,
//! and driver. The `new_headless` constructors allow testing without a real
//! terminal. The event loop is cooperative and synchronous: each input
//! event is fully handled — including the paired value-update and
//! revalidation for field edits — before the next event is read.

use std::io;
use std::time::Duration;

use crate::event::binding::{BindingAction, KeyBindingRegistry};
use crate::event::handler::EventDispatcher;
use crate::event::input::{InputEvent, MouseAction, MouseBtn};
use crate::event::message::{
    Custom, Envelope, FocusNext, FocusPrevious, Quit, SubmitPressed, ValueEdited,
};
use crate::form::field::FieldRegistry;
use crate::render::driver::Driver;
use crate::render::surface::Surface;
use crate::render::theme::Theme;
use crate::screen::FormScreen;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional form title rendered above the fields.
    pub title: Option<String>,
    /// Target frames per second for the render loop.
    pub fps: u32,
    /// Theme applied to the whole screen.
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the screen, driver, key bindings, event dispatcher, and config.
/// The driver is optional to support headless testing.
pub struct App {
    /// The form screen (store, widgets, focus, surface).
    pub screen: FormScreen,
    /// Terminal output driver. `None` in headless mode.
    pub driver: Option<Driver>,
    /// Key binding registry.
    pub bindings: KeyBindingRegistry,
    /// Event dispatcher (message queue).
    pub dispatcher: EventDispatcher,
    /// Application configuration.
    pub config: AppConfig,
    /// Whether the app is still running.
    running: bool,
    /// Whether a valid form was submitted.
    submitted: bool,
    /// The previous frame, for diffing.
    prev_frame: Surface,
    /// Set after a resize so the next draw repaints from a cleared screen.
    needs_clear: bool,
}

impl App {
    /// Create a new app with a real terminal driver.
    ///
    /// Queries the terminal size to set the initial screen dimensions.
    pub fn new(registry: FieldRegistry, config: AppConfig) -> io::Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let driver = Driver::new()?;
        Ok(Self::build(registry, config, Some(driver), width, height))
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(registry: FieldRegistry, width: u16, height: u16) -> Self {
        Self::build(registry, AppConfig::default(), None, width, height)
    }

    /// Create a headless app with a custom config.
    pub fn new_headless_with(
        registry: FieldRegistry,
        config: AppConfig,
        width: u16,
        height: u16,
    ) -> Self {
        Self::build(registry, config, None, width, height)
    }

    fn build(
        registry: FieldRegistry,
        config: AppConfig,
        driver: Option<Driver>,
        width: u16,
        height: u16,
    ) -> Self {
        let mut screen =
            FormScreen::new(registry, width, height).with_theme(config.theme.clone());
        if let Some(title) = &config.title {
            screen = screen.with_title(title.clone());
        }
        Self {
            screen,
            driver,
            bindings: KeyBindingRegistry::with_defaults(),
            dispatcher: EventDispatcher::new(),
            config,
            running: true,
            submitted: false,
            prev_frame: Surface::new(width, height),
            needs_clear: false,
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Handle an input event by resolving key bindings and routing to the
    /// screen.
    ///
    /// Bound keys win over the focused widget; unresolved keys go to the
    /// focused widget, whose messages are queued for `handle_messages`.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(ke) => {
                if let Some(action) = self.bindings.resolve(&ke) {
                    match action {
                        BindingAction::Quit => {
                            self.dispatcher.push(Envelope::new(Quit));
                        }
                        BindingAction::FocusNext => {
                            self.dispatcher.push(Envelope::new(FocusNext));
                        }
                        BindingAction::FocusPrevious => {
                            self.dispatcher.push(Envelope::new(FocusPrevious));
                        }
                        BindingAction::Custom(name) => {
                            self.dispatcher.push(Envelope::new(Custom::new(name.clone())));
                        }
                        BindingAction::Message(factory) => {
                            self.dispatcher.push(Envelope {
                                message: factory(),
                                sender: None,
                                handled: false,
                            });
                        }
                    }
                } else {
                    let envelopes = self.screen.handle_key(ke);
                    self.dispatcher.extend(envelopes);
                }
            }
            InputEvent::Mouse(me) => {
                if me.kind == MouseAction::Down(MouseBtn::Left) {
                    let envelopes = self.screen.click(me.x, me.y);
                    self.dispatcher.extend(envelopes);
                }
            }
            InputEvent::Paste(text) => {
                let envelopes = self.screen.handle_paste(&text);
                self.dispatcher.extend(envelopes);
            }
            InputEvent::Resize { width, height } => {
                self.screen.resize(width, height);
                self.prev_frame = Surface::new(width, height);
                self.needs_clear = true;
            }
            // Terminal focus events are currently unhandled at the app level.
            _ => {}
        }
    }

    /// Process all pending messages in the dispatcher.
    ///
    /// `ValueEdited` applies the value update and then revalidates the same
    /// field. `SubmitPressed` is honored only while the form is valid.
    pub fn handle_messages(&mut self) {
        let messages = self.dispatcher.drain();
        for envelope in messages {
            if envelope.downcast_ref::<Quit>().is_some() {
                self.running = false;
            } else if envelope.downcast_ref::<FocusNext>().is_some() {
                self.screen.focus_next();
            } else if envelope.downcast_ref::<FocusPrevious>().is_some() {
                self.screen.focus_previous();
            } else if let Some(edited) = envelope.downcast_ref::<ValueEdited>() {
                self.screen.apply_edit(&edited.field, &edited.value);
            } else if envelope.downcast_ref::<SubmitPressed>().is_some() {
                if self.screen.store().is_valid() {
                    self.submitted = true;
                    self.running = false;
                }
            }
            // Custom messages are left to embedding applications.
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether a valid form was submitted before quitting.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Whether the app has a terminal driver (not headless).
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }

    /// Run the blocking event loop until quit or submit.
    ///
    /// Polls for input at the configured fps; every event is handled and
    /// its messages drained before the next poll, then the frame is diffed
    /// against the previous one and flushed to the terminal.
    pub fn run(&mut self) -> io::Result<()> {
        if self.driver.is_none() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cannot run without a terminal driver",
            ));
        }

        if let Some(driver) = self.driver.as_mut() {
            driver.enter_alt_screen()?;
            driver.hide_cursor()?;
            driver.clear()?;
            driver.flush()?;
        }

        let tick = Duration::from_millis(1000 / u64::from(self.config.fps.max(1)));
        let result = self.event_loop(tick);

        if let Some(driver) = self.driver.as_mut() {
            driver.show_cursor()?;
            driver.leave_alt_screen()?;
            driver.flush()?;
        }
        result
    }

    fn event_loop(&mut self, tick: Duration) -> io::Result<()> {
        self.draw()?;
        while self.running {
            if crossterm::event::poll(tick)? {
                let event = InputEvent::from(crossterm::event::read()?);
                self.handle_input(event);
            }
            self.handle_messages();
            self.draw()?;
        }
        Ok(())
    }

    /// Render the screen and send the changed cells to the terminal.
    fn draw(&mut self) -> io::Result<()> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(());
        };
        if self.needs_clear {
            driver.clear()?;
            self.needs_clear = false;
        } else if !self.screen.needs_render() {
            return Ok(());
        }
        let frame = self.screen.render().clone();
        let updates = frame.diff(&self.prev_frame);
        driver.apply_updates(&updates)?;
        driver.flush()?;
        self.prev_frame = frame;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
