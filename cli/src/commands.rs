use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use playground_core::{
    FormState, PayloadRegistry, Playground, UploadController, UploadForm, UploadView,
};

use crate::config::{split_attribute, SendArgs};
use crate::files::read_file;
use crate::transport::Transport;

/// Everything a command needs to reach the server.
#[derive(Clone)]
pub struct Session {
    transport: Transport,
    server: String,
}

impl Session {
    pub fn new(server: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(timeout)?,
            server: server.into(),
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Fetch the template registry. A failed load is logged by the registry
    /// and yields an empty one.
    pub fn load_registry(&self) -> PayloadRegistry {
        let mut registry = PayloadRegistry::new();
        let outcome = self.transport.execute(PayloadRegistry::build_load(&self.server));
        let _ = registry.parse_load(outcome);
        registry
    }

    pub fn templates(&self) -> Vec<String> {
        self.load_registry().keys().into_iter().map(str::to_string).collect()
    }

    /// The form as it looks after applying `key`.
    pub fn show(&self, key: &str) -> Result<String> {
        let registry = self.load_registry();
        let mut form = FormState::new(self.server.clone());
        if !registry.apply(key, &mut form) {
            bail!("no template named `{key}`");
        }
        Ok(describe(&form))
    }

    /// Build the form from `args`, send it and return the response area text.
    pub fn send(&self, args: &SendArgs) -> Result<String> {
        let form = self.build_form(args)?;
        let mut playground = Playground::new();
        let (ticket, request) = match playground.begin_send(&form) {
            Ok(started) => started,
            Err(_) => return Ok(playground.response_text().to_string()),
        };
        let outcome = self.transport.execute(request);
        playground.finish_send(ticket, outcome);
        Ok(playground.response_text().to_string())
    }

    pub fn build_form(&self, args: &SendArgs) -> Result<FormState> {
        let base_url = args.base_url.clone().unwrap_or_else(|| self.server.clone());
        let mut form = FormState::new(base_url);

        if let Some(key) = &args.template {
            if !self.load_registry().apply(key, &mut form) {
                bail!("no template named `{key}`");
            }
        }
        if let Some(method) = &args.method {
            form.method = method.clone();
        }
        if let Some(endpoint) = &args.endpoint {
            form.endpoint = endpoint.clone();
        }
        if let Some(content_type) = args.content_type {
            form.set_content_type(content_type);
        }
        if let Some(auth_type) = &args.auth_type {
            form.auth_type = auth_type.clone();
        }
        if let Some(token) = &args.token {
            form.auth_token = token.clone();
        }
        if let Some(body) = &args.body {
            form.body = body.clone();
        }
        if let Some(path) = &args.body_file {
            form.body = std::fs::read_to_string(path)
                .with_context(|| format!("reading body from {}", path.display()))?;
        }
        for raw in &args.attributes {
            let (name, value) = split_attribute(raw);
            form.attributes.push(name, value);
        }
        for path in &args.files {
            form.files.push(read_file(path)?);
        }
        Ok(form)
    }

    pub fn upload(&self, order_data: Option<&Path>, driver_data: Option<&Path>) -> Result<UploadView> {
        let mut form = UploadForm {
            order_data: order_data.map(read_file).transpose()?,
            driver_data: driver_data.map(read_file).transpose()?,
        };
        let mut controller = UploadController::new();
        let request = controller.submit(&form, &self.server);
        let outcome = self.transport.execute(request);
        Ok(controller.finish(&mut form, outcome).clone())
    }
}

fn describe(form: &FormState) -> String {
    let visibility = form.visibility();
    let mut out = String::new();
    let _ = writeln!(out, "method:       {}", form.method);
    let _ = writeln!(out, "endpoint:     {}", form.endpoint);
    let _ = writeln!(out, "content type: {}", form.content_type());
    let _ = writeln!(out, "auth type:    {}", form.auth_type);
    if visibility.body {
        let _ = writeln!(out, "body:\n{}", form.body);
    }
    if visibility.form_data_fields {
        let _ = writeln!(out, "body:         (attributes and files)");
    }
    out
}
