use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::MediaStream;

use super::describe_js_error;

#[wasm_bindgen]
extern "C" {
  /// PeerJS signalling endpoint.
  pub type Peer;

  #[wasm_bindgen(constructor, catch)]
  fn new(id: &str) -> Result<Peer, JsValue>;

  #[wasm_bindgen(method, js_name = on)]
  fn on(
    this: &Peer,
    event: &str,
    handler: &js_sys::Function
  );

  #[wasm_bindgen(method, catch, js_name = call)]
  fn call(
    this: &Peer,
    id: &str,
    stream: &MediaStream
  ) -> Result<JsValue, JsValue>;

  #[wasm_bindgen(method)]
  fn destroy(this: &Peer);
}

#[wasm_bindgen]
extern "C" {
  /// One PeerJS media call, placed or
  /// received.
  pub type MediaConnection;

  #[wasm_bindgen(method, js_name = on)]
  fn on(
    this: &MediaConnection,
    event: &str,
    handler: &js_sys::Function
  );

  #[wasm_bindgen(method)]
  fn answer(
    this: &MediaConnection,
    stream: &MediaStream
  );

  #[wasm_bindgen(method)]
  pub fn close(this: &MediaConnection);
}

type Handler = Closure<dyn FnMut(JsValue)>;

/// What a connection reports back.
pub enum LinkSignal {
  Stream(MediaStream),
  Closed,
  Failed(String)
}

/// What the registered endpoint reports
/// back.
pub enum EndpointSignal {
  Opened(String),
  Offer(MediaConnection),
  Failed(String)
}

/// A registered endpoint together with the
/// handlers it calls into.
pub struct PeerEndpoint {
  peer:      Peer,
  _handlers: Vec<Handler>
}

impl PeerEndpoint {
  pub fn register(
    id: &str,
    mut notify: impl FnMut(EndpointSignal) + Clone + 'static
  ) -> Result<Self, String> {
    if !super::global_has(&["Peer"]) {
      return Err(
        "peer library is not loaded".to_string()
      );
    }
    let peer = Peer::new(id).map_err(|error| {
      describe_js_error(&error)
    })?;

    let mut on_open = notify.clone();
    let opened = Handler::new(
      move |value: JsValue| {
        let id = value
          .as_string()
          .unwrap_or_default();
        on_open(EndpointSignal::Opened(id));
      }
    );
    let mut on_call = notify.clone();
    let offered = Handler::new(
      move |value: JsValue| {
        on_call(EndpointSignal::Offer(
          value.unchecked_into()
        ));
      }
    );
    let failed = Handler::new(
      move |value: JsValue| {
        notify(EndpointSignal::Failed(
          describe_js_error(&value)
        ));
      }
    );

    peer.on("open", opened.as_ref().unchecked_ref());
    peer.on("call", offered.as_ref().unchecked_ref());
    peer.on("error", failed.as_ref().unchecked_ref());

    Ok(Self {
      peer,
      _handlers: vec![opened, offered, failed]
    })
  }

  pub fn call(
    &self,
    target: &str,
    stream: &MediaStream,
    notify: impl FnMut(LinkSignal) + Clone + 'static
  ) -> Result<CallLink, String> {
    let connection = self
      .peer
      .call(target, stream)
      .map_err(|error| {
        describe_js_error(&error)
      })?;
    if connection.is_undefined()
      || connection.is_null()
    {
      return Err(
        "peer refused to place the call"
          .to_string()
      );
    }
    Ok(CallLink::watch(
      connection.unchecked_into(),
      notify
    ))
  }

  pub fn destroy(&self) {
    self.peer.destroy();
  }
}

/// A media connection together with the
/// handlers it calls into.
pub struct CallLink {
  connection: MediaConnection,
  _handlers:  Vec<Handler>
}

impl CallLink {
  pub fn watch(
    connection: MediaConnection,
    mut notify: impl FnMut(LinkSignal) + Clone + 'static
  ) -> Self {
    let mut on_stream = notify.clone();
    let streamed = Handler::new(
      move |value: JsValue| {
        on_stream(LinkSignal::Stream(
          value.unchecked_into()
        ));
      }
    );
    let mut on_close = notify.clone();
    let closed = Handler::new(
      move |_value: JsValue| {
        on_close(LinkSignal::Closed);
      }
    );
    let failed = Handler::new(
      move |value: JsValue| {
        notify(LinkSignal::Failed(
          describe_js_error(&value)
        ));
      }
    );

    connection.on(
      "stream",
      streamed.as_ref().unchecked_ref()
    );
    connection
      .on("close", closed.as_ref().unchecked_ref());
    connection
      .on("error", failed.as_ref().unchecked_ref());

    Self {
      connection,
      _handlers: vec![streamed, closed, failed]
    }
  }

  pub fn answer(&self, stream: &MediaStream) {
    self.connection.answer(stream);
  }

  pub fn close(&self) {
    self.connection.close();
  }
}
