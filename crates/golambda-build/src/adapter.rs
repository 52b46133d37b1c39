pub use golambda_core::source::ENTRY_FILE_NAME;

/// Name of the exported function the adapter routes requests to.
pub const DEFAULT_HANDLER: &str = "Handler";

/// Headers added to every response the adapter returns.
pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "origin,Accept,Authorization,Content-Type",
    ),
];

/// Generates the Go `main` that puts a `net/http` handler behind the
/// API Gateway proxy contract.
pub struct AdapterTemplate<'a> {
    handler: &'a str,
}

impl Default for AdapterTemplate<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLER)
    }
}

impl<'a> AdapterTemplate<'a> {
    pub fn new(handler: &'a str) -> Self {
        Self { handler }
    }

    pub fn render(&self) -> String {
        let cors_headers: String = CORS_HEADERS
            .iter()
            .map(|(name, value)| format!("\t\theaders[\"{name}\"] = \"{value}\"\n"))
            .collect();

        TEMPLATE
            .replace("{handler}", self.handler)
            .replace("{cors_headers}", &cors_headers)
    }
}

const TEMPLATE: &str = r#"// Code generated by golambda. DO NOT EDIT.

package main

import (
	"context"
	"encoding/base64"
	"io"
	"net/http"
	"net/http/httptest"
	"net/url"
	"strings"

	"github.com/aws/aws-lambda-go/events"
	"github.com/aws/aws-lambda-go/lambda"
)

func main() {
	lambda.Start(route({handler}))
}

// route adapts a net/http handler to the API Gateway proxy contract.
func route(handler func(http.ResponseWriter, *http.Request)) func(context.Context, events.APIGatewayProxyRequest) (events.APIGatewayProxyResponse, error) {
	return func(ctx context.Context, request events.APIGatewayProxyRequest) (events.APIGatewayProxyResponse, error) {
		var body io.Reader = strings.NewReader(request.Body)
		if request.IsBase64Encoded {
			body = base64.NewDecoder(base64.StdEncoding, strings.NewReader(request.Body))
		}

		req, err := http.NewRequestWithContext(ctx, request.HTTPMethod, request.Path, body)
		if err != nil {
			return events.APIGatewayProxyResponse{
				Body:       err.Error(),
				StatusCode: http.StatusInternalServerError,
			}, nil
		}
		for key, value := range request.Headers {
			req.Header.Add(key, value)
		}

		query := url.Values{}
		for key, value := range request.QueryStringParameters {
			query.Add(key, value)
		}
		req.URL.RawQuery = query.Encode()

		rec := httptest.NewRecorder()
		handler(rec, req)

		res := rec.Result()
		defer res.Body.Close()

		headers := make(map[string]string)
		for key, values := range res.Header {
			headers[key] = ""
			if len(values) > 0 {
				headers[key] = values[0]
			}
		}

		responseBody, err := io.ReadAll(res.Body)
		if err != nil {
			return events.APIGatewayProxyResponse{
				Body:       err.Error(),
				Headers:    headers,
				StatusCode: http.StatusInternalServerError,
			}, err
		}

{cors_headers}
		return events.APIGatewayProxyResponse{
			Body:       string(responseBody),
			Headers:    headers,
			StatusCode: res.StatusCode,
		}, nil
	}
}
"#;
