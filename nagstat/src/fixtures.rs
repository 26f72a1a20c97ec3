//! Shared status data for unit tests.

pub const SAMPLE_STATUS: &str = "\
########################################
#          NAGIOS STATUS FILE
########################################

info {
\tcreated=1330000000
\tversion=3.2.3
\t}

programstatus {
\tmodified_host_attributes=0
\tnagios_pid=1234
\tenable_notifications=1
\t}

hoststatus {
\thost_name=web1
\tcurrent_state=0
\tplugin_output=PING OK - Packet loss = 0%
\t}

hoststatus {
\thost_name=db1
\tcurrent_state=0
\t}

servicestatus {
\thost_name=web1
\tservice_description=disk_root
\tcurrent_state=2
\tstate_type=1
\tlast_hard_state=2
\tnotifications_enabled=1
\tscheduled_downtime_depth=0
\tproblem_has_been_acknowledged=0
\tactive_checks_enabled=1
\tpassive_checks_enabled=1
\tplugin_output=DISK CRITICAL - free space: / 12 MB (1%)
\t}

servicestatus {
\thost_name=web1
\tservice_description=http
\tcurrent_state=0
\tstate_type=1
\tlast_hard_state=0
\tnotifications_enabled=1
\tscheduled_downtime_depth=0
\tproblem_has_been_acknowledged=0
\tactive_checks_enabled=1
\tpassive_checks_enabled=1
\tplugin_output=HTTP OK: HTTP/1.1 200 OK
\t}

servicestatus {
\thost_name=web1
\tservice_description=disk_var
\tcurrent_state=1
\tstate_type=0
\tlast_hard_state=0
\tnotifications_enabled=1
\tscheduled_downtime_depth=0
\tproblem_has_been_acknowledged=0
\tactive_checks_enabled=1
\tpassive_checks_enabled=1
\tplugin_output=DISK WARNING - free space: /var 300 MB (9%)
\t}

servicestatus {
\thost_name=db1
\tservice_description=disk_root
\tcurrent_state=1
\tstate_type=1
\tlast_hard_state=1
\tnotifications_enabled=0
\tscheduled_downtime_depth=0
\tproblem_has_been_acknowledged=1
\tactive_checks_enabled=1
\tpassive_checks_enabled=1
\tplugin_output=DISK WARNING - free space: / 800 MB (8%)
\t}

servicestatus {
\thost_name=db1
\tservice_description=backup
\tcurrent_state=3
\tstate_type=1
\tlast_hard_state=3
\tnotifications_enabled=1
\tscheduled_downtime_depth=1
\tproblem_has_been_acknowledged=0
\tactive_checks_enabled=0
\tpassive_checks_enabled=1
\tplugin_output=No backup report received
\t}

servicestatus {
\thost_name=webdb1
\tservice_description=mysql
\tcurrent_state=0
\tstate_type=1
\tlast_hard_state=0
\tnotifications_enabled=1
\tscheduled_downtime_depth=0
\tproblem_has_been_acknowledged=0
\tactive_checks_enabled=1
\tpassive_checks_enabled=1
\tplugin_output=Uptime: 1234 Threads: 2
\t}

contactstatus {
\tcontact_name=nagiosadmin
\thost_notifications_enabled=1
\tservice_notifications_enabled=1
\t}

hostcomment {
\thost_name=web1
\tentry_type=1
\tcomment_id=1
\tauthor=ops
\tcomment_data=Rebooted for kernel upgrade
\t}

servicecomment {
\thost_name=web1
\tservice_description=disk_root
\tcomment_id=2
\tauthor=ops
\tcomment_data=Cleaning up /tmp
\t}

servicecomment {
\thost_name=web1
\tservice_description=disk_root
\tcomment_id=3
\tauthor=ops
\tcomment_data=Still full
\t}

hostdowntime {
\thost_name=db1
\tdowntime_id=7
\tfixed=1
\t}

servicedowntime {
\thost_name=web1
\tservice_description=http
\tdowntime_id=9
\t}
";
