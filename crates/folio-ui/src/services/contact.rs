//! Contact form transport over `fetch`.

use crate::app::dom::{WebElement, js_detail};
use crate::core::contact::{ContactForm, ContactTransport};
use crate::error::ContactError;
use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::{FormData, HtmlFormElement};

/// The page's contact form and its submit control.
#[derive(Clone, Debug)]
pub(crate) struct WebForm {
    form: HtmlFormElement,
    submit: Option<WebElement>,
}

impl WebForm {
    pub(crate) const fn new(form: HtmlFormElement, submit: Option<WebElement>) -> Self {
        Self { form, submit }
    }
}

impl ContactForm for WebForm {
    type Element = WebElement;
    type Payload = FormData;

    fn action(&self) -> String {
        self.form.action()
    }

    fn payload(&self) -> Result<FormData, ContactError> {
        FormData::new_with_form(&self.form).map_err(|err| ContactError::Payload {
            detail: js_detail(&err),
        })
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn submit_control(&self) -> Option<WebElement> {
        self.submit.clone()
    }
}

/// Posts form data and reports the response status.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FetchTransport;

#[async_trait(?Send)]
impl ContactTransport<FormData> for FetchTransport {
    async fn deliver(&self, action: &str, payload: FormData) -> Result<u16, ContactError> {
        let response = Request::post(action)
            .header("Accept", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| ContactError::Transport {
                detail: err.to_string(),
            })?;
        Ok(response.status())
    }
}
