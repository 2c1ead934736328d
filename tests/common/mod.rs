use bytecode::mach::{Event, Runtime};

pub fn exec(runtime: &mut Runtime) -> String {
    exec_with_input(runtime, &[])
}

pub fn exec_with_input(runtime: &mut Runtime, input: &[&str]) -> String {
    let mut s = String::new();
    let mut feed = input.iter();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
                break;
            }
            Event::Running => {
                if prev_running {
                    s.push_str("\n5000 Execution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::Input => {
                let _ = runtime.input(feed.next().copied());
            }
        }
        prev_running = match event {
            Event::Running => true,
            _ => false,
        };
    }
    s
}
