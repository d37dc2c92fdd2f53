use yew::{
  Html,
  function_component,
  html
};

#[function_component(AboutPanel)]
pub fn about_panel() -> Html {
  html! {
      <div class="about-content glass-card">
          <h2 class="about-title">{ "About Mind Chill" }</h2>
          <div class="about-section">
              <h3>{ "The Project" }</h3>
              <p>{ "Mind Chill is a curated workspace designed to enhance focus, relaxation, and productivity. Combining aesthetic pixel art visuals with lo-fi beats, it provides a cozy virtual environment for study, work, or meditation." }</p>
          </div>
          <div class="about-section">
              <h3>{ "Features" }</h3>
              <ul>
                  <li>{ "🎵 Curated Lofi Streams & Interactive Backdrops" }</li>
                  <li>{ "⏱️ Built-in Pomodoro Timer for deep focus" }</li>
                  <li>{ "✅ Integrated To-Do List to track progress" }</li>
                  <li>{ "📹 \"Study With Me\" Peer-to-Peer Video Calling" }</li>
              </ul>
          </div>
          <div class="about-section">
              <h3>{ "The Creator" }</h3>
              <p>
                  { "Developed with ❤️ by " }
                  <strong>{ "Sijan Pradhan" }</strong>
                  { ". My goal was to create a minimal yet powerful hub that helps people stay productive while enjoying a peaceful atmosphere." }
              </p>
          </div>
          <div class="about-footer">
              <p>{ "© 2026 Mind Chill • Stay Cozy" }</p>
          </div>
      </div>
  }
}
