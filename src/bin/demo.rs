use curlfetch::{curl_cmd_parse, emit::to_python_code};

fn main() {
    let curl_command = "curl 'http://example.com' -H 'Accept: application/json' --data-raw $'{\"name\":\"it\\'s\"}'";
    match curl_cmd_parse(curl_command) {
        Ok(request) => {
            println!("{:?}", request);
            println!("{}", to_python_code(&request));
        }
        Err(e) => eprintln!("Error parsing curl command: {e}"),
    }
}
