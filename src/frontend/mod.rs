mod contact;
mod relay;
mod runtime;
mod sections;

use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};
use web_sys::window;
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::logging;
use crate::motion::scroll::nav_is_solid;
use crate::motion::split::{scatter, Particle, Scatter};
use crate::motion::MotionOptions;

use self::contact::Contact;
use self::runtime::{viewport, MotionRuntime};
use self::sections::{About, Certifications, Hero, Navigation, ParticleBackground, Projects, Skills};

const SHAPE_COUNT: usize = 6;
const HERO_FLOATER_COUNT: usize = 4;

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Decorative particles, scattered once per page load.
struct Decor {
    dots: Rc<Vec<Particle>>,
    shapes: Rc<Vec<Particle>>,
    floaters: Rc<Vec<Particle>>,
}

impl Decor {
    fn scatter(dots: usize) -> Self {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut rng = SmallRng::seed_from_u64(seed);

        Self {
            dots: Rc::new(scatter(dots, Scatter::DOTS, &mut rng)),
            shapes: Rc::new(scatter(SHAPE_COUNT, Scatter::SHAPES, &mut rng)),
            floaters: Rc::new(scatter(HERO_FLOATER_COUNT, Scatter::HERO, &mut rng)),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: SiteConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let runtime = use_memo(props.config.reduced_motion, |reduced_motion| {
        MotionRuntime::new(MotionOptions {
            reduced_motion: *reduced_motion,
        })
    });
    let decor = use_memo(props.config.particles, |dots| Decor::scatter(*dots));
    let nav_solid = use_state_eq(|| false);

    {
        let runtime = (*runtime).clone();
        let nav_solid = nav_solid.clone();
        use_effect_with((), move |_| {
            nav_solid.set(nav_is_solid(viewport().scroll_y));
            let listeners = runtime.publish(Callback::from(move |scroll_y| {
                nav_solid.set(nav_is_solid(scroll_y));
            }));

            move || drop(listeners)
        });
    }

    html! {
        <ContextProvider<MotionRuntime> context={(*runtime).clone()}>
            <div class="site">
                <Navigation solid={*nav_solid} />
                <ParticleBackground dots={decor.dots.clone()} shapes={decor.shapes.clone()} />
                <main>
                    <Hero floaters={decor.floaters.clone()} />
                    <About />
                    <Projects />
                    <Skills />
                    <Certifications />
                    <Contact config={props.config.clone()} />
                </main>
            </div>
        </ContextProvider<MotionRuntime>>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");

    let (mut config, fallbacks) = SiteConfig::resolve(|key| root.get_attribute(key));
    logging::init(&config.log_filter);
    for error in fallbacks {
        warn!(%error, "config_fallback");
    }

    config.reduced_motion |= prefers_reduced_motion();
    info!(
        particles = config.particles,
        reduced_motion = config.reduced_motion,
        relay_configured = config.relay_key.is_some(),
        "site_start"
    );

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
