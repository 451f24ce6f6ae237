use crate::config::PetConfig;
use crate::host::Host;
use crate::mode::BehaviorMode;
use crate::motion::components::MotionEvent;
use crate::motion::MotionController;
use crate::routine::{RoutineEvent, RoutineGate, RoutineModulator};
use crate::schedule::{Scheduler, Task, TimerHandle};

/// One mascot: the motion loop, the routine loop, and their timers.
///
/// Owns all motion state. The host talks to it only through the command
/// methods and receives output through [`Host`] callbacks.
pub struct Pet<H: Host, S: Scheduler> {
    host: H,
    scheduler: S,
    motion: MotionController,
    routine: RoutineModulator,
    rng: fastrand::Rng,

    motion_timer: Option<TimerHandle>,
    routine_timer: Option<TimerHandle>,
    disposed: bool,
}

impl<H: Host, S: Scheduler> Pet<H, S> {
    /// Build from config. Mode and follow flag are re-applied the same way a
    /// user command would, minus persistence.
    pub fn new(host: H, scheduler: S, config: &PetConfig, sprite_size: (i32, i32), mut rng: fastrand::Rng) -> Self {
        let mut motion = MotionController::new(config.motion.clone(), sprite_size, host.screen_size(), &mut rng);
        let routine = RoutineModulator::new(config.routine.clone(), host.local_time());
        motion.set_follow_mouse(config.follow_mouse);
        motion.set_behavior_mode(config.behavior_mode);

        let mut pet = Self {
            host,
            scheduler,
            motion,
            routine,
            rng,
            motion_timer: None,
            routine_timer: None,
            disposed: false,
        };
        pet.flush_motion_events();
        pet
    }

    /// Schedule the first motion and routine ticks.
    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        self.reschedule_motion(0);
        let interval = self.routine.interval_ms();
        self.routine_timer = Some(self.scheduler.schedule(interval, Task::Routine));
        log::info!("Pet started in {} mode", self.motion.mode().label());
    }

    /// Run a timer that fired. Each tick schedules its own successor.
    pub fn fire(&mut self, task: Task) {
        if self.disposed {
            return;
        }
        match task {
            Task::Motion => {
                self.motion_timer = None;
                let screen = self.host.screen_size();
                let pointer = self.host.pointer_position();
                let delay = self.motion.tick(screen, pointer, &mut self.rng);
                self.flush_motion_events();
                self.motion_timer = Some(self.scheduler.schedule(delay, Task::Motion));
            }
            Task::Routine => {
                self.routine_timer = None;
                let gate = RoutineGate {
                    paused: self.motion.is_paused(),
                    chat_visible: self.host.chat_panel_visible(),
                };
                let events = self.routine.tick(self.host.local_time(), gate, &mut self.rng);
                for event in events {
                    match event {
                        RoutineEvent::SpeedScale(scale) => self.motion.set_speed_scale(scale),
                        RoutineEvent::Greeting { kind, message } => self.host.on_greeting(kind, message),
                        RoutineEvent::Reminder { kind, message } => self.host.on_reminder(kind, message),
                    }
                }
                let interval = self.routine.interval_ms();
                self.routine_timer = Some(self.scheduler.schedule(interval, Task::Routine));
            }
        }
    }

    /// Cancel every pending timer. Later `fire` calls and commands do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for handle in [self.motion_timer.take(), self.routine_timer.take()].into_iter().flatten() {
            self.scheduler.cancel(handle);
        }
        log::info!("Pet disposed");
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn set_behavior_mode(&mut self, mode: BehaviorMode) {
        if self.disposed {
            return;
        }
        let follow_before = self.motion.follow_mouse();
        let restart = self.motion.set_behavior_mode(mode);
        if self.motion.follow_mouse() != follow_before {
            self.host.persist_follow_mouse(self.motion.follow_mouse());
        }
        self.host.persist_behavior_mode(mode);
        self.after_command(restart);
    }

    /// Unknown names are ignored.
    pub fn set_behavior_mode_str(&mut self, name: &str) {
        match name.parse::<BehaviorMode>() {
            Ok(mode) => self.set_behavior_mode(mode),
            Err(e) => log::debug!("Ignoring mode change: {e}"),
        }
    }

    pub fn set_follow_mouse(&mut self, enabled: bool) {
        if self.disposed {
            return;
        }
        self.motion.set_follow_mouse(enabled);
        self.host.persist_follow_mouse(enabled);
    }

    pub fn toggle_follow_mouse(&mut self) {
        let enabled = !self.motion.follow_mouse();
        self.set_follow_mouse(enabled);
    }

    pub fn pause(&mut self) {
        if self.disposed {
            return;
        }
        self.motion.pause();
        self.after_command(false);
    }

    pub fn resume(&mut self) {
        if self.disposed {
            return;
        }
        let restart = self.motion.resume();
        self.after_command(restart);
    }

    pub fn toggle_pause(&mut self) {
        if self.motion.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn notify_drag_start(&mut self) {
        if !self.disposed {
            self.motion.drag_start();
        }
    }

    /// The host moved the sprite under the pointer.
    pub fn notify_drag_move(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        self.motion.drag_move(x, y);
        self.after_command(false);
    }

    pub fn notify_drag_stop(&mut self) {
        if !self.disposed {
            self.motion.drag_stop();
        }
    }

    pub fn notify_music_start(&mut self) {
        if !self.disposed {
            self.motion.music_start();
        }
    }

    pub fn notify_music_stop(&mut self) {
        if self.disposed {
            return;
        }
        let restart = self.motion.music_stop();
        self.after_command(restart);
    }

    /// Frame size changed after a scale change.
    pub fn set_sprite_size(&mut self, w: i32, h: i32) {
        if !self.disposed {
            self.motion.set_sprite_size(w, h);
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn routine(&self) -> &RoutineModulator {
        &self.routine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -----------------------------------------------------------------------

    fn after_command(&mut self, restart: bool) {
        self.flush_motion_events();
        // Entering the move animation kicks the loop right away.
        if restart && self.motion_timer.is_some() {
            self.reschedule_motion(0);
        }
    }

    fn reschedule_motion(&mut self, delay_ms: u32) {
        if let Some(handle) = self.motion_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.motion_timer = Some(self.scheduler.schedule(delay_ms, Task::Motion));
    }

    fn flush_motion_events(&mut self) {
        for event in self.motion.drain_events() {
            match event {
                MotionEvent::PositionChanged { x, y } => self.host.on_position_changed(x, y),
                MotionEvent::FacingChanged { right } => self.host.on_facing_changed(right),
                MotionEvent::EnterIdle => self.host.on_enter_idle(),
                MotionEvent::EnterMove => self.host.on_enter_move(),
            }
        }
    }
}
