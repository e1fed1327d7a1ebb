impl<IN: InputProvider> GlanceApp<IN> {
    /// Stock cadence. Fetching itself happens in the firmware loop; this
    /// only decides when a fetch is owed and parks the mode on the posture
    /// check between pushes.
    fn tick_stock(&mut self, now: TickInstant) {
        if self.fetch_pending {
            return;
        }

        let due = self
            .last_stock_ms
            .is_none_or(|t| now.uptime_ms - t > self.config.stock_refresh_secs * 1_000);
        if !due {
            return;
        }

        // Outside market hours a cached table stays put, but the very first
        // frame is fetched regardless so the panel never sits on the splash.
        if self.rows.is_none() || clock::market_open(now.local) {
            if self.rows.is_none() {
                self.visible = Visible::Welcome;
                self.pending_render = true;
            }
            self.fetch_pending = true;
        } else {
            self.mode = Mode::PostureReminder;
        }
    }

    /// Folds a finished fetch back in. The stock timestamp only advances on
    /// an actual push; an unchanged table leaves the cycle due so the next
    /// pass refetches.
    pub fn complete_stock_fetch(&mut self, outcome: FetchOutcome, now: TickInstant) {
        self.fetch_pending = false;

        let fresh = match outcome {
            Ok(update) => quote::build_rows(self.config.symbols(), &update),
            Err(error) => {
                warn!("quote fetch failed: {:?}", error);
                quote::placeholder_rows(self.config.symbols())
            }
        };

        let changed = self.rows.as_ref() != Some(&fresh);
        if changed {
            self.rows = Some(fresh);
        }

        // A button may have switched modes while the fetch was in flight;
        // keep the fresher rows cached but leave the screen alone.
        if self.mode != Mode::StockStreaming {
            return;
        }

        if changed {
            self.push(Visible::StockTable);
            self.last_stock_ms = Some(now.uptime_ms);
        }
        self.mode = Mode::PostureReminder;
    }

    /// Posture cadence: raise the sign, hold it for the dwell, then restore
    /// the stock frame and hand control back.
    fn tick_posture(&mut self, now: TickInstant) {
        if let Some(restore_at) = self.posture_restore_at {
            if now.uptime_ms >= restore_at {
                self.posture_restore_at = None;
                self.last_posture_ms = now.uptime_ms;
                // Repaint the frame the sign covered; the routine already
                // counted when the sign went up. Nothing to restore before
                // the first table has landed.
                if self.rows.is_some() {
                    self.visible = Visible::StockTable;
                    self.pending_render = true;
                }
                self.mode = self.fallback;
            }
            return;
        }

        // A frame pushed earlier this tick is still waiting to flush; let
        // it show before the sign goes up.
        if self.pending_render {
            return;
        }

        let due = now.uptime_ms - self.last_posture_ms
            > self.config.posture_refresh_secs * 1_000;
        if due && clock::working_time(now.local) {
            self.push(Visible::Posture);
            self.posture_restore_at = Some(now.uptime_ms + self.config.posture_dwell_ms);
        }
        // Not due (or quiet hours): the mode holds and is re-evaluated every
        // tick; only the reminder itself or a button moves it on.
    }

    /// Clock cadence: repaint whenever the scheduled minute comes around,
    /// then schedule the next face three minutes out.
    fn tick_clock(&mut self, now: TickInstant) {
        if now.local.minute != self.next_clock_minute {
            return;
        }

        self.push(Visible::Clock {
            hour: now.local.hour,
            minute: now.local.minute,
        });
        self.next_clock_minute =
            (now.local.minute + self.config.clock_step_minutes) % 60;
    }
}
