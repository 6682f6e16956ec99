//! The fixture controller: one owned aggregate advanced by [`Device::tick`].
//!
//! Each tick runs, strictly in order: input sampling, event
//! classification, menu/settings/mode updates, LED output, then display
//! and backlight refresh. Nothing inside a tick blocks.

use crate::filter::SignalFilter;
use crate::io::{PwmOutputs, RawInputs};
use crate::led::{LedController, OperatingMode};
use crate::power::{PowerManager, PowerState};
use crate::settings::{ByteStore, ConfigStore, Configuration};
use crate::time::{Clock, Millis};
use crate::ui::input_logic::{ButtonClassifier, PotGestures};
use crate::ui::menu::{Menu, MenuAction};
use crate::ui::render::{Renderer, View};
use crate::ui::{CharDisplay, InputEvent, Screen};

pub struct Device<S: ByteStore> {
    store: ConfigStore<S>,
    mode: OperatingMode,
    light: SignalFilter,
    pot: SignalFilter,
    button: ButtonClassifier,
    /// Created on the first tick, anchored to the first pot reading.
    gestures: Option<PotGestures>,
    menu: Menu,
    leds: LedController,
    renderer: Renderer,
    power: PowerManager,
}

impl<S: ByteStore> Device<S> {
    /// Load the stored configuration (persisting defaults if there is none)
    /// and adopt its operating mode.
    pub fn boot<C: Clock>(storage: S, clock: &C) -> Self {
        let now = clock.now();
        let mut store = ConfigStore::new(storage);
        if !store.load() {
            info!("Config: using defaults");
            store.save();
        }

        let mode = store.config().operating_mode;
        info!("Boot: mode {}", mode.name());
        let leds = LedController::new(store.config(), now);

        Self {
            store,
            mode,
            light: SignalFilter::new(),
            pot: SignalFilter::new(),
            button: ButtonClassifier::new(),
            gestures: None,
            menu: Menu::new(),
            leds,
            renderer: Renderer::new(),
            power: PowerManager::new(now),
        }
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn screen(&self) -> Screen {
        self.menu.screen()
    }

    pub fn is_editing(&self) -> bool {
        self.menu.is_editing()
    }

    pub fn config(&self) -> &Configuration {
        self.store.config()
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    /// Filtered ambient light level (0-100).
    pub fn light_percentage(&self) -> f32 {
        self.light.read_percentage()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.store.storage_mut()
    }

    /// Run one scheduler tick.
    pub fn tick<C, P, D>(&mut self, clock: &C, inputs: RawInputs, pwm: &mut P, display: &mut D)
    where
        C: Clock,
        P: PwmOutputs,
        D: CharDisplay,
    {
        let now = clock.now();

        self.light.sample(inputs.light_raw);
        self.pot.sample(inputs.pot_raw);
        let light_pct = self.light.read_percentage();
        let pot_pct = self.pot.read_percentage();

        if let Some(event) = self.button.update(inputs.button_pressed, now) {
            self.dispatch(event, now);
        }

        let gestures = self
            .gestures
            .get_or_insert_with(|| PotGestures::new(pot_pct, now));
        if self.menu.is_editing() {
            self.menu.apply_pot(pot_pct, self.store.config_mut());
            gestures.track(pot_pct, now);
        } else if let Some(event) = gestures.update(pot_pct, now) {
            self.dispatch(event, now);
        }

        self.leds
            .tick(self.mode, self.store.config(), light_pct, now, pwm);

        let view = View {
            screen: self.menu.screen(),
            mode: self.mode,
            light_pct,
            config: self.store.config(),
        };
        self.renderer.render(display, &view, now);
        self.power.tick(self.store.config(), now, pwm);
    }

    fn dispatch(&mut self, event: InputEvent, now: Millis) {
        debug!("Input: {:?}", event);
        self.power.activity(now);

        match self.menu.handle(event) {
            MenuAction::None => {}
            MenuAction::ScreenChanged(screen) => debug!("Menu: screen {:?}", screen),
            MenuAction::EditStarted => info!("Menu: editing {:?}", self.menu.screen()),
            MenuAction::EditCommitted => {
                info!("Menu: edit committed");
                self.store.save();
            }
            MenuAction::AdvanceMode => self.advance_mode(),
        }
    }

    fn advance_mode(&mut self) {
        let next = self.mode.next();
        info!("Mode: {} -> {}", self.mode.name(), next.name());
        self.store.config_mut().operating_mode = next;
        self.store.save();
        self.mode = next;
    }
}
