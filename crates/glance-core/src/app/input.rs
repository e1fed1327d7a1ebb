impl<IN: InputProvider> GlanceApp<IN> {
    /// Applies the latched button press, if any. Buttons override whatever
    /// the running mode is doing, including an in-progress posture dwell.
    fn process_input(&mut self, now: TickInstant) {
        let Ok(Some(event)) = self.input.poll() else {
            return;
        };

        if self.posture_restore_at.take().is_some() {
            // The interrupted reminder still counts as delivered.
            self.last_posture_ms = now.uptime_ms;
        }

        match event {
            ButtonEvent::Button1 => {
                self.mode = Mode::StockStreaming;
                self.fallback = Mode::StockStreaming;
                // Nothing to redisplay before the first table has landed.
                if self.rows.is_some() {
                    self.visible = Visible::StockTable;
                    self.pending_render = true;
                }
            }
            ButtonEvent::Button2 => {
                self.mode = Mode::Clock;
                self.fallback = Mode::Clock;
                // Render on this very tick instead of waiting for the next
                // scheduled minute.
                self.next_clock_minute = now.local.minute;
            }
            ButtonEvent::Button3 | ButtonEvent::Button4 => {
                self.mode = Mode::Null;
                self.visible = Visible::ButtonAck { button: event };
                self.pending_render = true;
            }
        }
    }
}
