use super::*;
use crate::behaviors::form::Validation;

impl Page {
    pub(super) fn wire_contact_form(&mut self) -> Result<()> {
        let Some(form) = self.dom.by_id("contact-form") else {
            return Ok(());
        };
        let validator = FormValidator::new(
            self.config.required_fields.clone(),
            self.config.email_field.clone(),
            self.email.clone(),
        );
        self.behaviors.form = Some(FormBinding {
            form,
            validator,
            saved_label: None,
            reset_timer: None,
        });
        self.listeners.add(form, "submit", Handler::SubmitContactForm);
        for control in self.form_controls(form)? {
            self.listeners.add(control, "input", Handler::ClearFieldError);
        }
        Ok(())
    }

    fn form_controls(&self, form: NodeId) -> Result<Vec<NodeId>> {
        self.dom
            .query_selector_all_from(form, "input, select, textarea")
    }

    fn named_control(&self, controls: &[NodeId], name: &str) -> Option<NodeId> {
        controls
            .iter()
            .copied()
            .find(|control| self.dom.attr(*control, "name").as_deref() == Some(name))
    }

    /// Successful controls in document order, the way the browser builds
    /// the submission body.
    fn collect_form_data(&self, controls: &[NodeId]) -> Result<FormData> {
        let mut data = FormData::new();
        for control in controls.iter().copied() {
            if self.dom.disabled(control) {
                continue;
            }
            let Some(name) = self.dom.attr(control, "name").filter(|name| !name.is_empty()) else {
                continue;
            };
            if self.dom.is_tag(control, "input") {
                let kind = self
                    .dom
                    .attr(control, "type")
                    .unwrap_or_else(|| "text".into())
                    .to_ascii_lowercase();
                match kind.as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" => {
                        if self.dom.attr(control, "checked").is_none() {
                            continue;
                        }
                        let value = self
                            .dom
                            .attr(control, "value")
                            .unwrap_or_else(|| "on".into());
                        data.insert(name, value);
                        continue;
                    }
                    _ => {}
                }
            }
            data.insert(name, self.dom.value(control)?);
        }
        Ok(data)
    }

    pub(super) fn submit_contact_form(&mut self, event: &mut EventState) -> Result<()> {
        event.default_prevented = true;
        let Some(binding) = self.behaviors.form.as_ref() else {
            return Ok(());
        };
        let form = binding.form;
        let validator = binding.validator.clone();

        let controls = self.form_controls(form)?;
        let data = self.collect_form_data(&controls)?;

        // Validation reads the live value of the first control with each
        // name, present or not in the submission body.
        let mut fields = FormData::new();
        let invalid_color = self.config.invalid_field_color.clone();
        for name in validator.required() {
            let Some(control) = self.named_control(&controls, name) else {
                continue;
            };
            let value = self.dom.value(control)?;
            let color = if FormValidator::is_filled(Some(&value)) {
                ""
            } else {
                invalid_color.as_str()
            };
            self.dom.style_set(control, "border-color", color)?;
            fields.insert(name.as_str(), value);
        }
        let email_control = self.named_control(&controls, validator.email_field());
        if let Some(control) = email_control {
            fields.insert(validator.email_field(), self.dom.value(control)?);
        }

        match validator.validate(&fields) {
            Validation::MissingFields(missing) => {
                self.trace_behavior_line(format!(
                    "[behavior] form rejected missing={}",
                    missing.join(",")
                ));
                self.alert(self.config.missing_fields_notice.clone());
                Ok(())
            }
            Validation::InvalidEmail => {
                if let Some(control) = email_control {
                    self.dom.style_set(control, "border-color", &invalid_color)?;
                }
                self.trace_behavior_line("[behavior] form rejected invalid_email".into());
                self.alert(self.config.invalid_email_notice.clone());
                Ok(())
            }
            Validation::Valid => self.confirm_submission(form, data),
        }
    }

    fn confirm_submission(&mut self, form: NodeId, data: FormData) -> Result<()> {
        self.trace_behavior_line(format!(
            "[behavior] form submitted fields={}",
            data.entries().len()
        ));
        self.platform.submissions.push(FormSubmission {
            submitted_at_ms: self.scheduler.now_ms,
            data,
        });

        let Some(button) = self.dom.query_selector_from(form, "button[type=submit]")? else {
            return Ok(());
        };
        let current_label = self.dom.text_content(button);
        let Some(binding) = self.behaviors.form.as_mut() else {
            return Ok(());
        };
        // A resubmission before the reset keeps the label from the first one.
        let original_label = binding.saved_label.get_or_insert(current_label).clone();
        let pending_reset = binding.reset_timer.take();
        if let Some(timer_id) = pending_reset {
            self.cancel_timer(timer_id);
        }

        let submitted_label = self.config.submitted_label.clone();
        let submitted_color = self.config.submitted_color.clone();
        self.dom.set_text_content(button, &submitted_label)?;
        self.dom.style_set(button, "background", &submitted_color)?;
        self.dom.set_disabled(button, true)?;

        let delay_ms = self.config.form_reset_delay_ms;
        let timer_id = self.schedule_timeout(Task::FormReset { original_label }, delay_ms);
        if let Some(binding) = self.behaviors.form.as_mut() {
            binding.reset_timer = Some(timer_id);
        }
        Ok(())
    }

    /// Puts every control back to its parsed value and restores the button.
    pub(super) fn reset_contact_form(&mut self, original_label: &str) -> Result<()> {
        let Some(binding) = self.behaviors.form.as_mut() else {
            return Ok(());
        };
        binding.reset_timer = None;
        binding.saved_label = None;
        let form = binding.form;

        for control in self.form_controls(form)? {
            self.dom.reset_value(control)?;
        }
        if let Some(button) = self.dom.query_selector_from(form, "button[type=submit]")? {
            self.dom.set_text_content(button, original_label)?;
            self.dom.style_set(button, "background", "")?;
            self.dom.set_disabled(button, false)?;
        }
        self.trace_behavior_line("[behavior] form reset".into());
        Ok(())
    }

    pub(super) fn clear_field_error(&mut self, event: &EventState) -> Result<()> {
        let Some(control) = event.current_target else {
            return Ok(());
        };
        self.dom.style_set(control, "border-color", "")
    }
}
