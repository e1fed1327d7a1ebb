impl<IN: InputProvider> GlanceApp<IN> {
    pub fn new(input: IN, config: TickerConfig) -> Self {
        Self {
            input,
            config,
            mode: Mode::StockStreaming,
            fallback: Mode::StockStreaming,
            visible: Visible::Welcome,
            pending_render: false,
            fetch_pending: false,
            last_stock_ms: None,
            last_posture_ms: 0,
            next_clock_minute: 0,
            posture_restore_at: None,
            rows: None,
            refresh_count: 0,
            logged_decade: None,
        }
    }

    /// Advances the controller by one tick.
    ///
    /// Button presses are applied first, then the active mode's cadence.
    /// At most one render is requested per tick.
    pub fn tick(&mut self, now: TickInstant) -> TickResult {
        self.process_input(now);

        match self.mode {
            Mode::Null => {}
            Mode::StockStreaming => self.tick_stock(now),
            Mode::PostureReminder => self.tick_posture(now),
            Mode::Clock => self.tick_clock(now),
        }

        self.note_refresh_decade();

        if self.pending_render {
            self.pending_render = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Hands the current view model to `f` without copying row storage out.
    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        match self.visible {
            Visible::Welcome => f(Screen::Welcome {
                symbols: self.config.symbols(),
            }),
            Visible::StockTable => match self.rows.as_ref() {
                Some(rows) => f(Screen::StockTable { rows }),
                None => f(Screen::Welcome {
                    symbols: self.config.symbols(),
                }),
            },
            Visible::Posture => f(Screen::PostureReminder),
            Visible::Clock { hour, minute } => f(Screen::Clock { hour, minute }),
            Visible::ButtonAck { button } => f(Screen::ButtonAck { button }),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn refresh_count(&self) -> u32 {
        self.refresh_count
    }

    /// True while the firmware owes the app a quote fetch.
    pub fn fetch_pending(&self) -> bool {
        self.fetch_pending
    }

    /// Marks a mode-driven display push. Button redisplays bypass this so
    /// the refresh counter tracks scheduled updates only.
    fn push(&mut self, visible: Visible) {
        self.visible = visible;
        self.pending_render = true;
        self.refresh_count += 1;
    }

    /// Logs the refresh counter once per decade, including zero at boot.
    fn note_refresh_decade(&mut self) {
        if self.refresh_count % 10 != 0 {
            return;
        }

        let decade = self.refresh_count / 10;
        if self.logged_decade != Some(decade) {
            self.logged_decade = Some(decade);
            info!("screen refresh count: {}", self.refresh_count);
        }
    }
}
