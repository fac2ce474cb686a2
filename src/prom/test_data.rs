pub const DASHBOARD_EXAMPLE: &str = r#"# HELP jira_open_tickets_total Number of open tickets
# TYPE jira_open_tickets_total gauge
jira_open_tickets_total 7
# HELP slack_messages_total Messages sent
# TYPE slack_messages_total counter
slack_messages_total{user="U1"} 3
slack_messages_total{user="U2"} 5
"#;

pub const EMPLOYEE_METRICS: &str = r#"# HELP jira_tickets_by_status Tickets per workflow status
# TYPE jira_tickets_by_status gauge
jira_tickets_by_status{status="Done"} 12
jira_tickets_by_status{status="In Progress"} 4
jira_tickets_by_status{status="Completed"} 9
# HELP jira_tickets_by_assignee Tickets per assignee
# TYPE jira_tickets_by_assignee gauge
jira_tickets_by_assignee{assignee="U09ALTU98N9"} 5
jira_tickets_by_assignee{assignee="Unassigned"} 2
jira_tickets_by_assignee{assignee="U09ANKW5H0A"} 0
# HELP jira_tickets_completed_total Tickets completed
# TYPE jira_tickets_completed_total counter
jira_tickets_completed_total 21
# HELP jira_open_tickets_total Number of open tickets
# TYPE jira_open_tickets_total gauge
jira_open_tickets_total 7
# HELP jira_avg_hours_per_ticket Average hours logged per ticket
# TYPE jira_avg_hours_per_ticket gauge
jira_avg_hours_per_ticket 3.5
# HELP jira_hours_logged_total Hours logged
# TYPE jira_hours_logged_total counter
jira_hours_logged_total 73.5

# HELP slack_messages_total Messages sent
# TYPE slack_messages_total counter
slack_messages_total{user="USLACKBOT"} 0
slack_messages_total{user="U09ALTU98N9"} 42
slack_messages_total{user="U09ANKW5H0A"} 17
slack_messages_total{user="U0UNKNOWN"} 3
# HELP slack_reactions_total Reactions added
# TYPE slack_reactions_total counter
slack_reactions_total{user="U09ALTU98N9"} 8
slack_reactions_total{user="U09ANKXGRPC"} 0
"#;

pub const HISTOGRAM: &str = r#"# HELP http_request_duration_seconds A histogram of the request duration.
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_bucket{le="0.05"} 24054
http_request_duration_seconds_bucket{le="0.1"} 33444
http_request_duration_seconds_bucket{le="+Inf"} 144320
http_request_duration_seconds_sum 53423
http_request_duration_seconds_count 144320
"#;
