use keel_hal::{Error, Status, System};

/// Platform bring-up phase.
///
/// The provided [`init`](Self::init) hands off to the HAL's
/// [`system_init`](System::system_init) and reports its status verbatim.
/// A board that needs more, such as bringing up a bus, implements `init`
/// itself; call sites never change.
pub trait Platform: System {
    fn init(&mut self) -> Status {
        self.system_init()
    }
}

impl<T: Platform + ?Sized> Platform for &mut T {
    fn init(&mut self) -> Status {
        T::init(self)
    }
}

/// User application phases.
///
/// Both phases have do-nothing defaults, so an application that overrides
/// neither still boots into an idle spin.
pub trait App {
    /// One-time setup, run after the platform is up.
    fn setup(&mut self) -> Status {
        Ok(())
    }

    /// One iteration of the user loop.
    fn tick(&mut self) {}
}

/// No application: setup succeeds, the loop spins.
impl App for () {}

impl<T: App + ?Sized> App for &mut T {
    fn setup(&mut self) -> Status {
        T::setup(self)
    }

    fn tick(&mut self) {
        T::tick(self)
    }
}

/// Where the boot sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// [`Lifecycle::run`] has not been called.
    NotStarted,
    /// Platform init is running.
    Initializing,
    /// User setup is running.
    SettingUp,
    /// The user loop owns the thread for good.
    Looping,
    /// Init or setup failed with the carried error.
    Failed(Error),
}

/// Sequences platform init, user setup and the user loop.
///
/// `P` and `A` are fixed when the binary is built, so each phase resolves
/// to exactly one implementation with no runtime dispatch.
pub struct Lifecycle<P, A> {
    platform: P,
    app: A,
    phase: Phase,
}

impl<P: Platform, A: App> Lifecycle<P, A> {
    pub const fn new(platform: P, app: A) -> Self {
        Self { platform, app, phase: Phase::NotStarted }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the boot sequence.
    ///
    /// Returns only when platform init or user setup fails, with that
    /// phase's error unchanged. Once both succeed the user loop runs forever.
    ///
    /// Calling `run` again after a failure returns the recorded error
    /// without touching any phase.
    pub fn run(&mut self) -> Error {
        match self.phase {
            Phase::NotStarted => {}
            Phase::Failed(e) => return e,
            // Only reachable if a phase unwound out of a previous call.
            Phase::Initializing | Phase::SettingUp | Phase::Looping => {
                return Error::InvalidState
            }
        }

        self.phase = Phase::Initializing;
        if let Err(e) = self.platform.init() {
            self.phase = Phase::Failed(e);
            return e;
        }

        self.phase = Phase::SettingUp;
        if let Err(e) = self.app.setup() {
            self.phase = Phase::Failed(e);
            return e;
        }

        self.phase = Phase::Looping;
        loop {
            self.app.tick();
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn app(&self) -> &A {
        &self.app
    }
}

/// Build a [`Lifecycle`] from `platform` and `app` and run it.
pub fn run<P: Platform, A: App>(platform: P, app: A) -> Error {
    Lifecycle::new(platform, app).run()
}
