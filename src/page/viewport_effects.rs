use super::*;
use crate::behaviors::counter::{CounterFrame, block_visible, parse_count_target};
use crate::behaviors::reveal::{IntersectionOptions, intersects_clipped};

const REVEAL_TARGETS: &str = ".service-card, .team-card, .commit-card, .feature, .stat-card";
const REVEAL_CLASS: &str = "animate-fade-in-up";

impl Page {
    pub(super) fn wire_counters(&mut self) -> Result<()> {
        self.behaviors.counters.stats = self.dom.query_selector(".stats")?;
        self.behaviors.counters.numbers = self.dom.query_selector_all(".stat-card__number")?;
        self.listeners.add_window("scroll", Handler::CheckCounters);
        self.check_counters()
    }

    /// Starts every counter the first time the stats block is on screen.
    pub(super) fn check_counters(&mut self) -> Result<()> {
        if self.behaviors.counters.trigger.has_fired() {
            return Ok(());
        }
        let Some(stats) = self.behaviors.counters.stats else {
            return Ok(());
        };
        let viewport_height = self.window.viewport.height;
        let visible = self
            .viewport_span(stats)
            .is_some_and(|(top, bottom)| block_visible(top, bottom, viewport_height));
        if !self.behaviors.counters.trigger.fire_if(visible) {
            return Ok(());
        }

        let count = self.behaviors.counters.numbers.len();
        self.trace_behavior_line(format!("[behavior] counters start count={count}"));
        for index in 0..count {
            self.start_counter(index)?;
        }
        Ok(())
    }

    fn start_counter(&mut self, index: usize) -> Result<()> {
        let node = self.behaviors.counters.numbers[index];
        let raw = self.dom.attr(node, "data-count").unwrap_or_default();
        let Some(target) = parse_count_target(&raw) else {
            let label = self.trace_node_label(node);
            self.trace_behavior_line(format!(
                "[behavior] counter skipped node={label} data-count={raw:?}"
            ));
            return Ok(());
        };
        let animation = CounterAnimation::new(
            target,
            self.config.counter_duration_ms,
            self.config.frame_interval_ms,
        );
        self.behaviors.counters.running.insert(index, animation);
        self.step_counter(index)
    }

    /// Runs one animation frame; unfinished counters request the next one.
    pub(super) fn step_counter(&mut self, index: usize) -> Result<()> {
        let Some(animation) = self.behaviors.counters.running.get_mut(&index) else {
            return Ok(());
        };
        let frame = animation.tick();
        let node = self.behaviors.counters.numbers[index];
        match frame {
            CounterFrame::Running(value) => {
                self.dom.set_text_content(node, &value.to_string())?;
                let frame_ms = self.config.frame_interval_ms;
                self.schedule_timeout(Task::CounterFrame { counter: index }, frame_ms);
            }
            CounterFrame::Finished(value) => {
                self.behaviors.counters.running.remove(&index);
                self.dom.set_text_content(node, &value.to_string())?;
                let label = self.trace_node_label(node);
                self.trace_behavior_line(format!(
                    "[behavior] counter done node={label} value={value}"
                ));
            }
        }
        Ok(())
    }

    pub(super) fn wire_reveal_on_scroll(&mut self) -> Result<()> {
        let mut containers = Vec::new();
        for target in self.dom.query_selector_all(REVEAL_TARGETS)? {
            self.dom.style_set(target, "opacity", "0")?;
            self.behaviors.reveal.observe(target);
            if let Some(container) = self.scroll_container(target) {
                if !containers.contains(&container) {
                    containers.push(container);
                }
            }
        }
        if self.behaviors.reveal.observed().is_empty() {
            return Ok(());
        }
        self.listeners.add_window("scroll", Handler::CheckRevealTargets);
        self.listeners.add_window("resize", Handler::CheckRevealTargets);
        for container in containers {
            self.listeners.add(container, "scroll", Handler::CheckRevealTargets);
        }
        self.check_reveal_targets()
    }

    pub(super) fn check_reveal_targets(&mut self) -> Result<()> {
        let options = IntersectionOptions {
            threshold: self.config.reveal_threshold,
            bottom_margin: self.config.reveal_bottom_margin,
        };
        let visible = self.intersecting(self.behaviors.reveal.observed(), options);
        let revealed = self
            .behaviors
            .reveal
            .take_visible(|node| visible.contains(&node));
        for node in revealed {
            self.dom.class_add(node, REVEAL_CLASS)?;
            let label = self.trace_node_label(node);
            self.trace_behavior_line(format!("[behavior] reveal node={label}"));
        }
        Ok(())
    }

    pub(super) fn wire_lazy_images(&mut self) -> Result<()> {
        for image in self.dom.query_selector_all("img[data-src]")? {
            self.behaviors.lazy_images.observe(image);
        }
        if self.behaviors.lazy_images.observed().is_empty() {
            return Ok(());
        }
        self.listeners.add_window("scroll", Handler::CheckLazyImages);
        self.listeners.add_window("resize", Handler::CheckLazyImages);
        self.check_lazy_images()
    }

    /// Swaps `data-src` into `src` for images that reach the viewport.
    pub(super) fn check_lazy_images(&mut self) -> Result<()> {
        let visible = self.intersecting(
            self.behaviors.lazy_images.observed(),
            IntersectionOptions::ANY_PIXEL,
        );
        let loaded = self
            .behaviors
            .lazy_images
            .take_visible(|node| visible.contains(&node));
        for image in loaded {
            let Some(source) = self
                .dom
                .attr(image, "data-src")
                .filter(|source| !source.is_empty())
            else {
                continue;
            };
            self.dom.set_attr(image, "src", &source)?;
            self.dom.remove_attr(image, "data-src")?;
            self.trace_behavior_line(format!("[behavior] lazy image src={source}"));
        }
        Ok(())
    }

    fn intersecting(&self, nodes: &[NodeId], options: IntersectionOptions) -> Vec<NodeId> {
        let viewport_height = self.window.viewport.height;
        nodes
            .iter()
            .copied()
            .filter(|node| {
                let clip = self.horizontal_clip(*node);
                self.viewport_span(*node).is_some_and(|(top, bottom)| {
                    intersects_clipped(top, bottom, clip, viewport_height, options)
                })
            })
            .collect()
    }
}
