use bytes::Bytes;
use courier_http::protocol::{Body, BoxError, Request, Response};
use courier_http::serializer::ResponseSerializer;
use courier_http::stream::{DuplexStream, IoTransport};
use courier_middleware::{Chainer, Middlewares, middleware_fn};
use http::StatusCode;
use tokio::io::AsyncReadExt;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let middlewares = Middlewares::builder()
        .add_last(middleware_fn(|request: Request, response: Response| async move {
            info!(path = request.path(), "incoming request");
            Chainer::Next(request, response.header("Server", "courier"))
        }))
        .add_last(middleware_fn(|request: Request, mut response: Response| async move {
            if request.path() != "/stream" {
                return Chainer::Respond(Response::new(StatusCode::NOT_FOUND, "not found\n"));
            }
            response.add_cookie_header("visited=1; Path=/");
            response.set_body(Body::writer(|sink| {
                Box::pin(async move {
                    for line in ["first line\n", "second line\n"] {
                        sink.write(Bytes::from_static(line.as_bytes())).await?;
                    }
                    Ok::<(), BoxError>(())
                })
            }));
            Chainer::Next(request, response)
        }))
        .build();

    for path in ["/stream", "/missing"] {
        let request = Request::get(path.parse().expect("valid uri")).header("Host", "localhost");
        let response = match middlewares.chain(request, Response::ok(())).await.into_response() {
            Ok(response) => response,
            Err(e) => {
                error!(cause = %e, "middleware chain failed");
                continue;
            }
        };

        let (client, mut server) = tokio::io::duplex(16 * 1024);
        let reader = tokio::spawn(async move {
            let mut received = String::new();
            server.read_to_string(&mut received).await.map(|_| received)
        });

        let mut transport = IoTransport::new(client);
        if let Err(e) = ResponseSerializer::new(&mut transport).serialize(response).await {
            error!(cause = %e, "failed to serialize response");
        }
        if let Err(e) = transport.close().await {
            error!(cause = %e, "failed to close transport");
        }

        match reader.await {
            Ok(Ok(received)) => println!("--- {path} ---\n{received}"),
            Ok(Err(e)) => error!(cause = %e, "failed to read response"),
            Err(e) => error!(cause = %e, "reader task panicked"),
        }
    }
}
