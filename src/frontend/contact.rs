use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::relay::GlooRelay;
use super::runtime::{clock, use_section};
use super::sections::{select, select_all};
use crate::config::SiteConfig;
use crate::contact::{self, BannerKind, ContactState, Field, RelaySettings};
use crate::content;
use crate::motion::choreography::{self, ContactRig, Group};
use crate::motion::Magnetic;

fn field_value(event: &InputEvent) -> Option<String> {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        return Some(input.value());
    }
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
}

/// Schedules the re-render that hides the current banner. Replacing the
/// previous timeout cancels it.
fn arm_banner_timer(
    state: &Rc<RefCell<ContactState>>,
    timer: &Rc<RefCell<Option<Timeout>>>,
    refresh: &UseForceUpdateHandle,
) {
    let Some(expires_at) = state.borrow().banner().map(|banner| banner.expires_at) else {
        return;
    };
    let delay_ms = ((expires_at - clock()).max(0.0) * 1000.0).ceil() as u32 + 1;

    let state = state.clone();
    let refresh = refresh.clone();
    let timeout = Timeout::new(delay_ms, move || {
        if state.borrow_mut().expire(clock()) {
            refresh.force_update();
        }
    });
    *timer.borrow_mut() = Some(timeout);
}

#[derive(Properties, PartialEq)]
pub struct ContactProps {
    pub config: SiteConfig,
}

#[function_component(Contact)]
pub fn contact_section(props: &ContactProps) -> Html {
    let root = use_node_ref();
    let state = use_mut_ref(|| ContactState::new(props.config.banner_timeout));
    let banner_timer = use_mut_ref(|| None::<Timeout>);
    let refresh = use_force_update();

    {
        let root = root.clone();
        let magnetic = Magnetic {
            damping: props.config.magnetic_damping,
            ..Magnetic::default()
        };
        use_section(move |runtime| {
            let root = root.cast::<Element>()?;
            let heading = select(&root, ".section-heading")?;
            let form = select(&root, ".contact-form")?;
            let fields = select_all(&form, ".form-element");
            let submit = select(&form, ".submit")?;

            let rig = ContactRig {
                root: runtime.adopt(&root)?,
                heading: runtime.adopt(&heading)?,
                form: Group::new(runtime.adopt(&form)?, runtime.adopt_all(&fields)),
                submit: runtime.adopt(&submit)?,
            };
            Some(choreography::contact(&rig, magnetic))
        });
    }

    let oninput = |field: Field| {
        let state = state.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(value) = field_value(&event) {
                state.borrow_mut().form.set(field, value);
                refresh.force_update();
            }
        })
    };

    let onsubmit = {
        let state = state.clone();
        let banner_timer = banner_timer.clone();
        let refresh = refresh.clone();
        let settings = RelaySettings::from(&props.config);
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let started = state.borrow_mut().begin(clock());
            let Some(form) = started else {
                arm_banner_timer(&state, &banner_timer, &refresh);
                refresh.force_update();
                return;
            };
            refresh.force_update();

            let state = state.clone();
            let banner_timer = banner_timer.clone();
            let refresh = refresh.clone();
            let settings = settings.clone();
            spawn_local(async move {
                let outcome = contact::send(&GlooRelay, &settings, &form).await;
                state.borrow_mut().finish(outcome, clock());
                arm_banner_timer(&state, &banner_timer, &refresh);
                refresh.force_update();
            });
        })
    };

    let current = state.borrow();
    let sending = current.is_sending();
    let banner = current.banner().map(|banner| {
        let kind = match banner.kind {
            BannerKind::Success => "is-success",
            BannerKind::Error => "is-error",
        };
        html! { <div class={classes!("banner", kind)} role="status">{banner.text}</div> }
    });

    html! {
        <section id="contact" ref={root} class="section contact">
            <div class="container narrow">
                <h2 class="section-heading centered">
                    {"Get In "}<span class="gradient-text">{"Touch"}</span>
                </h2>
                <form class="contact-form" onsubmit={onsubmit} novalidate={true}>
                    <div class="form-element">
                        <label for="name">{"Name"}</label>
                        <input
                            id="name"
                            name="name"
                            type="text"
                            placeholder="Your name"
                            value={current.form.name.clone()}
                            oninput={oninput(Field::Name)}
                        />
                    </div>
                    <div class="form-element">
                        <label for="email">{"Email"}</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            placeholder="your.email@example.com"
                            value={current.form.email.clone()}
                            oninput={oninput(Field::Email)}
                        />
                    </div>
                    <div class="form-element">
                        <label for="message">{"Message"}</label>
                        <textarea
                            id="message"
                            name="message"
                            rows="5"
                            placeholder="Your message..."
                            value={current.form.message.clone()}
                            oninput={oninput(Field::Message)}
                        />
                    </div>
                    <div class="form-element centered">
                        <button class="submit" type="submit" disabled={sending}>
                            { if sending { "Sending..." } else { "Send Message" } }
                        </button>
                    </div>
                </form>
                { for banner }
                <div class="contact-cards">
                    <div class="card contact-card">
                        <h3>{"Email"}</h3>
                        <p class="accent">{content::EMAIL}</p>
                    </div>
                    <div class="card contact-card">
                        <h3>{"Phone"}</h3>
                        <p class="accent">{content::PHONE}</p>
                    </div>
                </div>
            </div>
        </section>
    }
}
